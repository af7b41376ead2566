//! The session countdown driver.
//!
//! A [`Session`] is one attempt at one level. The host calls
//! [`Session::advance`] once per scheduling quantum with the real time that
//! passed; the session accumulates elapsed time, applies the level's
//! per-tick deltas every `tick_interval` seconds, runs the current activity,
//! reports progress, and resolves the outcome when time runs out.
//!
//! # Resolution
//!
//! A session resolves exactly once. The first of these wins, and every
//! later terminal signal is swallowed:
//!
//! 1. a gauge reaching zero (defeat with that gauge's reason),
//! 2. the host calling [`Session::stop`] (defeat with the given reason),
//! 3. time expiring (victory iff the outcome gauge meets the requirement).
//!
//! Once ended, `advance`, `apply_deltas`, and `stop` are no-ops.

use semester_gauges::{
    CharacterTemplate, Gauge, GaugeError, GaugeObserver, NoOpObserver, RecordingObserver,
};
use semester_types::{
    GaugeDeltas, ObserverEvent, GaugeKind, PlayerState, SessionId, SessionOutcome, SessionState,
};
use tracing::{debug, info, warn};

use crate::activity::{ActivityRun, ActivitySettings};
use crate::config::GaugesConfig;

/// Errors that can occur when starting a session or an activity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Session duration is not a positive finite number.
    #[error("invalid session duration: {duration}")]
    InvalidDuration {
        /// The rejected duration.
        duration: f32,
    },

    /// Tick interval is not a positive finite number.
    #[error("invalid tick interval: {interval}")]
    InvalidTickInterval {
        /// The rejected interval.
        interval: f32,
    },

    /// Activity time scale is not a positive finite number.
    #[error("invalid time scale: {time_scale}")]
    InvalidTimeScale {
        /// The rejected time scale.
        time_scale: f32,
    },

    /// Requirement or per-tick deltas are not finite.
    #[error("invalid session thresholds: {reason}")]
    InvalidThresholds {
        /// Explanation of what is wrong.
        reason: String,
    },

    /// A gauge could not be built.
    #[error("gauge error: {source}")]
    Gauge {
        /// The underlying gauge error.
        #[from]
        source: GaugeError,
    },

    /// A gauge settings slot holds a different kind.
    #[error("gauge slot {slot} is configured as {found}")]
    MisplacedGauge {
        /// The slot being filled.
        slot: GaugeKind,
        /// The kind found in it.
        found: GaugeKind,
    },

    /// An activity's settings are malformed.
    #[error("invalid activity '{name}': {reason}")]
    InvalidActivity {
        /// Activity name.
        name: String,
        /// Explanation of what is wrong.
        reason: String,
    },

    /// The player is already doing something.
    #[error("cannot start '{name}': player is busy")]
    PlayerBusy {
        /// Activity that was rejected.
        name: String,
    },

    /// The session has already been resolved.
    #[error("session has already ended")]
    SessionEnded,
}

/// Receives session notifications on top of the gauge callbacks.
pub trait SessionObserver: GaugeObserver {
    /// Countdown progress in `[0, 1]`, once per quantum.
    fn on_progress(&mut self, fraction: f32);

    /// Remaining timer fill of the running activity, once per quantum.
    fn on_activity_progress(&mut self, _name: &str, _remaining: f32) {}

    /// The player character changed state.
    fn on_player_state_changed(&mut self, _state: PlayerState) {}
}

impl SessionObserver for NoOpObserver {
    fn on_progress(&mut self, _fraction: f32) {}
}

impl SessionObserver for RecordingObserver {
    fn on_progress(&mut self, fraction: f32) {
        self.push(ObserverEvent::Progress { fraction });
    }

    fn on_activity_progress(&mut self, name: &str, remaining: f32) {
        self.push(ObserverEvent::ActivityProgress {
            name: name.to_owned(),
            remaining,
        });
    }

    fn on_player_state_changed(&mut self, state: PlayerState) {
        self.push(ObserverEvent::PlayerStateChanged { state });
    }
}

/// Parameters of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Session length in seconds.
    pub duration: f32,
    /// Seconds between two applications of `per_tick`.
    pub tick_interval: f32,
    /// Raw deltas applied each tick (before template scaling).
    pub per_tick: GaugeDeltas,
    /// Gauge compared against `requirement` when time runs out.
    pub outcome_gauge: GaugeKind,
    /// Minimum outcome gauge value for a victory.
    pub requirement: f32,
    /// Message reported on victory.
    pub victory_message: String,
    /// Reason reported when the requirement is missed.
    pub defeat_reason: String,
    /// Seconds per activity tick.
    pub time_scale: f32,
}

impl SessionSettings {
    /// Check that the countdown can run.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SessionError::InvalidDuration {
                duration: self.duration,
            });
        }
        if !self.tick_interval.is_finite() || self.tick_interval <= 0.0 {
            return Err(SessionError::InvalidTickInterval {
                interval: self.tick_interval,
            });
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(SessionError::InvalidTimeScale {
                time_scale: self.time_scale,
            });
        }
        if !self.requirement.is_finite() || self.requirement < 0.0 {
            return Err(SessionError::InvalidThresholds {
                reason: format!("requirement must be a non-negative number (got {})", self.requirement),
            });
        }
        if !self.per_tick.is_finite() {
            return Err(SessionError::InvalidThresholds {
                reason: "per-tick deltas must be finite".to_owned(),
            });
        }
        Ok(())
    }
}

/// The three gauges of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauges {
    grades: Gauge,
    happiness: Gauge,
    fatigue: Gauge,
}

impl Gauges {
    /// Build all three gauges, announcing each initial value.
    ///
    /// Only the `outcome` gauge receives the requirement threshold.
    fn build(
        config: &GaugesConfig,
        outcome: GaugeKind,
        requirement: f32,
        observer: &mut dyn GaugeObserver,
    ) -> Result<Self, SessionError> {
        let mut build = |kind: GaugeKind| {
            let req = (kind == outcome).then_some(requirement);
            Gauge::new(config.settings_for(kind), req, &mut *observer)
        };
        Ok(Self {
            grades: build(GaugeKind::Grades)?,
            happiness: build(GaugeKind::Happiness)?,
            fatigue: build(GaugeKind::Fatigue)?,
        })
    }

    /// The gauge for `kind`.
    pub const fn get(&self, kind: GaugeKind) -> &Gauge {
        match kind {
            GaugeKind::Grades => &self.grades,
            GaugeKind::Happiness => &self.happiness,
            GaugeKind::Fatigue => &self.fatigue,
        }
    }

    const fn get_mut(&mut self, kind: GaugeKind) -> &mut Gauge {
        match kind {
            GaugeKind::Grades => &mut self.grades,
            GaugeKind::Happiness => &mut self.happiness,
            GaugeKind::Fatigue => &mut self.fatigue,
        }
    }

    /// Iterate over the gauges in [`GaugeKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Gauge> {
        GaugeKind::ALL.into_iter().map(|kind| self.get(kind))
    }

    /// Add each non-zero delta to its gauge.
    fn apply(&mut self, deltas: &GaugeDeltas, observer: &mut dyn GaugeObserver) {
        for (kind, delta) in deltas.non_zero() {
            self.get_mut(kind).add(delta, observer);
        }
    }
}

/// Forwards gauge callbacks to the host and lets only the first terminal
/// event through.
struct TerminalGate<'a> {
    inner: &'a mut dyn SessionObserver,
    defeat: Option<String>,
}

impl<'a> TerminalGate<'a> {
    fn new(inner: &'a mut dyn SessionObserver) -> Self {
        Self {
            inner,
            defeat: None,
        }
    }
}

impl GaugeObserver for TerminalGate<'_> {
    fn on_value_changed(&mut self, value: f32, max: f32, kind: GaugeKind) {
        self.inner.on_value_changed(value, max, kind);
    }

    fn on_warning_changed(&mut self, is_warning: bool, kind: GaugeKind, is_below_requirement: bool) {
        self.inner
            .on_warning_changed(is_warning, kind, is_below_requirement);
    }

    fn on_terminal(&mut self, is_victory: bool, reason: &str) {
        if self.defeat.is_none() {
            self.defeat = Some(reason.to_owned());
            self.inner.on_terminal(is_victory, reason);
        }
    }
}

/// One timed play session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    settings: SessionSettings,
    template: CharacterTemplate,
    gauges: Gauges,
    elapsed: f32,
    since_last_tick: f32,
    ticks: u64,
    state: SessionState,
    player: PlayerState,
    activity: Option<ActivityRun>,
}

impl Session {
    /// Validate the configuration and build the session's gauges.
    ///
    /// Each gauge announces its initial value on `observer`. Nothing is
    /// built if any setting is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the session settings, the template, or
    /// any gauge setting is invalid.
    pub fn start(
        settings: SessionSettings,
        gauges: &GaugesConfig,
        template: CharacterTemplate,
        observer: &mut dyn SessionObserver,
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        template.validate()?;
        for kind in GaugeKind::ALL {
            let slot = gauges.settings_for(kind);
            if slot.kind != kind {
                return Err(SessionError::MisplacedGauge {
                    slot: kind,
                    found: slot.kind,
                });
            }
            slot.validate()?;
        }
        let outcome = gauges.settings_for(settings.outcome_gauge);
        if settings.requirement > outcome.max_value {
            return Err(SessionError::Gauge {
                source: GaugeError::InvalidThresholds {
                    kind: outcome.kind,
                    reason: format!(
                        "requirement {} above max {}",
                        settings.requirement, outcome.max_value
                    ),
                },
            });
        }

        let mut gate = TerminalGate::new(observer);
        let gauges = Gauges::build(
            gauges,
            settings.outcome_gauge,
            settings.requirement,
            &mut gate,
        )?;
        let id = SessionId::new();

        info!(
            session_id = %id,
            duration = settings.duration,
            tick_interval = settings.tick_interval,
            requirement = settings.requirement,
            template = template.name,
            "Session started"
        );

        Ok(Self {
            id,
            settings,
            template,
            gauges,
            elapsed: 0.0,
            since_last_tick: 0.0,
            ticks: 0,
            state: SessionState::Running,
            player: PlayerState::Default,
            activity: None,
        })
    }

    /// Advance the countdown by `dt` seconds.
    ///
    /// Order within a quantum: accumulate time, apply the level tick if
    /// due, step the running activity, report progress, then resolve if a
    /// gauge hit zero or time ran out. Negative or non-finite `dt` counts
    /// as zero.
    pub fn advance(&mut self, dt: f32, observer: &mut dyn SessionObserver) -> &SessionState {
        if !self.state.is_running() {
            return &self.state;
        }
        let dt = sanitize_dt(dt);

        self.elapsed += dt;
        self.since_last_tick += dt;

        let mut gate = TerminalGate::new(observer);

        if self.since_last_tick >= self.settings.tick_interval {
            self.since_last_tick = 0.0;
            self.ticks = self.ticks.saturating_add(1);
            let scaled = self.template.scale(&self.settings.per_tick);
            debug!(session_id = %self.id, tick = self.ticks, elapsed = self.elapsed, "Session tick");
            self.gauges.apply(&scaled, &mut gate);
        }

        if gate.defeat.is_none() {
            self.step_activity(dt, &mut gate);
        }

        gate.inner.on_progress(self.progress());

        if let Some(reason) = gate.defeat.take() {
            // The gate already forwarded on_terminal.
            self.end(SessionOutcome::Defeat { reason }, gate.inner, false);
        } else if self.elapsed >= self.settings.duration {
            self.resolve_expired(gate.inner);
        }

        &self.state
    }

    /// Apply a discrete player action, scaled by the template.
    pub fn apply_deltas(
        &mut self,
        deltas: &GaugeDeltas,
        observer: &mut dyn SessionObserver,
    ) -> &SessionState {
        if !self.state.is_running() {
            return &self.state;
        }
        let scaled = self.template.scale(deltas);
        let mut gate = TerminalGate::new(observer);
        self.gauges.apply(&scaled, &mut gate);
        if let Some(reason) = gate.defeat.take() {
            self.end(SessionOutcome::Defeat { reason }, gate.inner, false);
        }
        &self.state
    }

    /// End the session from outside (e.g. the player quit).
    pub fn stop(&mut self, reason: &str, observer: &mut dyn SessionObserver) -> &SessionState {
        if self.state.is_running() {
            self.end(
                SessionOutcome::Defeat {
                    reason: reason.to_owned(),
                },
                observer,
                true,
            );
        }
        &self.state
    }

    /// Start a timed activity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionEnded`] after resolution,
    /// [`SessionError::PlayerBusy`] while another activity runs, or
    /// [`SessionError::InvalidActivity`] for malformed settings.
    pub fn start_activity(
        &mut self,
        settings: &ActivitySettings,
        observer: &mut dyn SessionObserver,
    ) -> Result<(), SessionError> {
        if !self.state.is_running() {
            return Err(SessionError::SessionEnded);
        }
        if self.player != PlayerState::Default {
            return Err(SessionError::PlayerBusy {
                name: settings.name.clone(),
            });
        }
        settings.validate()?;

        info!(session_id = %self.id, activity = settings.name, "Activity started");
        self.activity = Some(ActivityRun::new(settings, self.settings.time_scale));
        self.set_player(PlayerState::Busy, observer);
        Ok(())
    }

    fn step_activity(&mut self, dt: f32, gate: &mut TerminalGate<'_>) {
        let Some(run) = self.activity.as_mut() else {
            return;
        };

        let step = run.step(dt);
        let scaled = self.template.scale(run.deltas());
        for _ in 0..step.applications {
            self.gauges.apply(&scaled, gate);
            if gate.defeat.is_some() {
                return;
            }
        }
        gate.inner.on_activity_progress(run.name(), step.remaining);

        if step.finished {
            info!(session_id = %self.id, activity = run.name(), "Activity finished");
            self.activity = None;
            self.set_player(PlayerState::Default, gate.inner);
        }
    }

    fn resolve_expired(&mut self, observer: &mut dyn SessionObserver) {
        let value = self.gauges.get(self.settings.outcome_gauge).value();
        let outcome = if value >= self.settings.requirement {
            SessionOutcome::Victory {
                message: self.settings.victory_message.clone(),
            }
        } else {
            SessionOutcome::Defeat {
                reason: self.settings.defeat_reason.clone(),
            }
        };
        self.end(outcome, observer, true);
    }

    fn end(&mut self, outcome: SessionOutcome, observer: &mut dyn SessionObserver, notify: bool) {
        if notify {
            observer.on_terminal(outcome.is_victory(), outcome.text());
        }
        info!(
            session_id = %self.id,
            victory = outcome.is_victory(),
            reason = outcome.text(),
            elapsed = self.elapsed,
            ticks = self.ticks,
            "Session ended"
        );
        self.activity = None;
        self.state = SessionState::Ended(outcome);
        self.set_player(PlayerState::GameOver, observer);
    }

    fn set_player(&mut self, state: PlayerState, observer: &mut dyn SessionObserver) {
        if self.player != state {
            self.player = state;
            observer.on_player_state_changed(state);
        }
    }

    /// Session identifier.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Current state.
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current player state.
    pub const fn player_state(&self) -> PlayerState {
        self.player
    }

    /// The session's gauges.
    pub const fn gauges(&self) -> &Gauges {
        &self.gauges
    }

    /// The gauge for `kind`.
    pub const fn gauge(&self, kind: GaugeKind) -> &Gauge {
        self.gauges.get(kind)
    }

    /// Session parameters.
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Active character template.
    pub const fn template(&self) -> &CharacterTemplate {
        &self.template
    }

    /// The running activity, if any.
    pub const fn activity(&self) -> Option<&ActivityRun> {
        self.activity.as_ref()
    }

    /// Seconds accumulated so far.
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds left before time expires.
    pub fn remaining(&self) -> f32 {
        (self.settings.duration - self.elapsed).max(0.0)
    }

    /// Number of level ticks applied.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Countdown progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.settings.duration).clamp(0.0, 1.0)
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        warn!(dt, "Ignoring invalid time step");
        0.0
    }
}

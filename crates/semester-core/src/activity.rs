//! Timed player activities.
//!
//! An activity (studying, partying, sleeping) keeps the player busy for
//! `duration * time_scale` seconds. While it runs, its deltas are applied
//! every `time_scale` seconds, and once more when it completes. The
//! remaining timer fill drives the countdown ring above the activity.
//!
//! [`ActivityRun`] only does the bookkeeping: it reports how many times the
//! deltas are due in a quantum. The session applies them, so template
//! scaling and terminal gating stay in one place.

use semester_types::GaugeDeltas;
use serde::Deserialize;

use crate::session::SessionError;

/// Static description of an activity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivitySettings {
    /// Display name, also used to select the activity.
    pub name: String,

    /// Flavor text.
    #[serde(default)]
    pub description: String,

    /// Raw deltas applied per activity tick (before template scaling).
    #[serde(default)]
    pub deltas: GaugeDeltas,

    /// Length in activity ticks; multiplied by the time scale (default: 3).
    #[serde(default = "default_activity_duration")]
    pub duration: f32,
}

impl ActivitySettings {
    /// Build an activity without a description.
    pub fn new(name: &str, deltas: GaugeDeltas, duration: f32) -> Self {
        Self {
            name: name.to_owned(),
            description: String::new(),
            deltas,
            duration,
        }
    }

    /// Reject non-positive durations and non-finite deltas.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SessionError::InvalidActivity {
                name: self.name.clone(),
                reason: format!("duration must be positive (got {})", self.duration),
            });
        }
        if !self.deltas.is_finite() {
            return Err(SessionError::InvalidActivity {
                name: self.name.clone(),
                reason: "deltas must be finite".to_owned(),
            });
        }
        Ok(())
    }
}

const fn default_activity_duration() -> f32 {
    3.0
}

/// What happened to a running activity during one quantum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityStep {
    /// How many times the deltas are due this quantum (0, 1, or 2).
    pub applications: u32,
    /// Timer fill still to run, in `[0, 1]`.
    pub remaining: f32,
    /// The activity completed this quantum.
    pub finished: bool,
}

/// An activity in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRun {
    name: String,
    deltas: GaugeDeltas,
    total: f32,
    tick_interval: f32,
    elapsed: f32,
    since_last_tick: f32,
    finished: bool,
}

impl ActivityRun {
    /// Start running `settings` at the given time scale.
    ///
    /// The caller validates both inputs beforehand.
    pub fn new(settings: &ActivitySettings, time_scale: f32) -> Self {
        Self {
            name: settings.name.clone(),
            deltas: settings.deltas,
            total: settings.duration * time_scale,
            tick_interval: time_scale,
            elapsed: 0.0,
            since_last_tick: 0.0,
            finished: false,
        }
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> ActivityStep {
        if self.finished {
            return ActivityStep {
                applications: 0,
                remaining: 0.0,
                finished: true,
            };
        }

        self.elapsed += dt;
        self.since_last_tick += dt;

        let mut applications: u32 = 0;
        if self.since_last_tick >= self.tick_interval {
            self.since_last_tick = 0.0;
            applications = applications.saturating_add(1);
        }

        // Completion always applies the deltas one final time.
        if self.elapsed >= self.total {
            self.finished = true;
            applications = applications.saturating_add(1);
        }

        ActivityStep {
            applications,
            remaining: self.remaining(),
            finished: self.finished,
        }
    }

    /// Activity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw deltas applied per activity tick.
    pub const fn deltas(&self) -> &GaugeDeltas {
        &self.deltas
    }

    /// Timer fill still to run, in `[0, 1]`.
    pub fn remaining(&self) -> f32 {
        (1.0 - self.elapsed / self.total).clamp(0.0, 1.0)
    }

    /// Whether the activity has completed.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

//! Observer that turns session callbacks into `tracing` events.

use semester_core::session::SessionObserver;
use semester_gauges::GaugeObserver;
use semester_types::{GaugeKind, PlayerState};
use tracing::{debug, info, trace, warn};

/// Logs every callback. Progress is logged at `info` once per 10%.
#[derive(Debug, Default)]
pub struct LoggingObserver {
    last_decile: f32,
    terminal_events: u32,
}

impl LoggingObserver {
    /// Create an observer with no progress logged yet.
    pub const fn new() -> Self {
        Self {
            last_decile: 0.0,
            terminal_events: 0,
        }
    }

    /// Number of terminal events seen across all sessions.
    pub const fn terminal_events(&self) -> u32 {
        self.terminal_events
    }
}

impl GaugeObserver for LoggingObserver {
    fn on_value_changed(&mut self, value: f32, max: f32, kind: GaugeKind) {
        debug!(%kind, value, max, "Gauge changed");
    }

    fn on_warning_changed(&mut self, is_warning: bool, kind: GaugeKind, is_below_requirement: bool) {
        if is_warning {
            warn!(%kind, "Gauge low");
        } else if is_below_requirement {
            warn!(%kind, "Gauge below requirement");
        } else {
            info!(%kind, "Gauge recovered");
        }
    }

    fn on_terminal(&mut self, is_victory: bool, reason: &str) {
        self.terminal_events = self.terminal_events.saturating_add(1);
        self.last_decile = 0.0;
        info!(is_victory, reason, "Session resolved");
    }
}

impl SessionObserver for LoggingObserver {
    fn on_progress(&mut self, fraction: f32) {
        trace!(fraction, "Progress");
        let decile = (fraction * 10.0).floor();
        if decile > self.last_decile {
            self.last_decile = decile;
            info!(percent = decile * 10.0, "Level progress");
        }
    }

    fn on_activity_progress(&mut self, name: &str, remaining: f32) {
        trace!(activity = name, remaining, "Activity progress");
    }

    fn on_player_state_changed(&mut self, state: PlayerState) {
        debug!(?state, "Player state changed");
    }
}

//! Serializable record of observer callbacks.
//!
//! Each variant mirrors one callback of the gauge/session observer traits.
//! Recording observers push these into a list so tests can assert on the
//! exact callback stream, and the engine can dump it as JSON.

use serde::{Deserialize, Serialize};

use crate::enums::{GaugeKind, PlayerState};

/// One observer callback, captured as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum ObserverEvent {
    /// A gauge wrote a new value (also emitted once at construction).
    ValueChanged {
        /// Which gauge changed.
        kind: GaugeKind,
        /// The clamped value after the write.
        value: f32,
        /// The gauge's upper bound.
        max: f32,
    },
    /// A gauge crossed its warning or requirement threshold.
    WarningChanged {
        /// Which gauge changed.
        kind: GaugeKind,
        /// The gauge is at or below its warning threshold.
        is_warning: bool,
        /// The gauge is at or below its requirement (and above warning).
        is_below_requirement: bool,
    },
    /// The session reached a terminal state.
    Terminal {
        /// `true` for victory, `false` for game-over.
        is_victory: bool,
        /// Message or reason attached to the outcome.
        reason: String,
    },
    /// Session countdown progress in `[0, 1]`.
    Progress {
        /// Fraction of the session duration elapsed.
        fraction: f32,
    },
    /// Remaining timer fill of the running activity in `[0, 1]`.
    ActivityProgress {
        /// Activity name.
        name: String,
        /// Fraction of the activity still to run.
        remaining: f32,
    },
    /// The player character changed state.
    PlayerStateChanged {
        /// The new state.
        state: PlayerState,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag() {
        let event = ObserverEvent::WarningChanged {
            kind: GaugeKind::Grades,
            is_warning: true,
            is_below_requirement: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "warning_changed");
        assert_eq!(json["kind"], "grades");
        assert_eq!(json["is_warning"], true);
    }

    #[test]
    fn session_events_parse_from_tagged_json() {
        let event: ObserverEvent =
            serde_json::from_str(r#"{"event": "player_state_changed", "state": "busy"}"#).unwrap();
        assert_eq!(
            event,
            ObserverEvent::PlayerStateChanged {
                state: PlayerState::Busy
            }
        );
    }
}

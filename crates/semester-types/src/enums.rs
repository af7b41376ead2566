//! Enumeration types for the Semester simulation.
//!
//! Gauge kinds route callbacks to the right UI widget, character types
//! label templates, and the player/session states describe where a play
//! session currently stands.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Gauges
// ---------------------------------------------------------------------------

/// Which resource a gauge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeKind {
    /// Academic standing. The only gauge that carries a pass requirement.
    Grades,
    /// Mood of the student.
    Happiness,
    /// Remaining stamina of the student.
    Fatigue,
}

impl GaugeKind {
    /// Every gauge kind in display order.
    pub const ALL: [Self; 3] = [Self::Grades, Self::Happiness, Self::Fatigue];

    /// Stable lowercase label used in logs and config keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grades => "grades",
            Self::Happiness => "happiness",
            Self::Fatigue => "fatigue",
        }
    }
}

impl core::fmt::Display for GaugeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// Archetype label of a character template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterType {
    /// First archetype.
    #[default]
    A,
    /// Second archetype.
    B,
    /// Third archetype.
    C,
}

/// What the player character is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// Idle and free to start an activity.
    #[default]
    Default,
    /// Performing a timed activity.
    Busy,
    /// The session has ended; no further input is accepted.
    GameOver,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Terminal result of a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum SessionOutcome {
    /// The timer expired with the outcome gauge at or above the requirement.
    Victory {
        /// Message shown to the player.
        message: String,
    },
    /// A gauge reached zero, the requirement was missed, or the host stopped
    /// the session.
    Defeat {
        /// Why the session was lost.
        reason: String,
    },
}

impl SessionOutcome {
    /// Whether this outcome is a victory.
    pub const fn is_victory(&self) -> bool {
        matches!(self, Self::Victory { .. })
    }

    /// The message or reason attached to the outcome.
    pub fn text(&self) -> &str {
        match self {
            Self::Victory { message } => message,
            Self::Defeat { reason } => reason,
        }
    }
}

/// Whether a session is still being driven.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "outcome")]
pub enum SessionState {
    /// The countdown is still running.
    #[default]
    Running,
    /// The session has been resolved. Terminal.
    Ended(SessionOutcome),
}

impl SessionState {
    /// Whether the session is still running.
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// The resolved outcome, if the session has ended.
    pub const fn outcome(&self) -> Option<&SessionOutcome> {
        match self {
            Self::Running => None,
            Self::Ended(outcome) => Some(outcome),
        }
    }
}

//! Type-safe session identifier around [`Uuid`].
//!
//! Every play session gets a time-ordered UUID v7 so log lines and reports
//! from consecutive levels sort naturally.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a single play session (one level attempt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new time-ordered (UUID v7) identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

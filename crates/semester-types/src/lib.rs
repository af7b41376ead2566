//! Shared type definitions for the Semester simulation.
//!
//! This crate is the single source of truth for the vocabulary shared by
//! the gauge, session, and engine crates. It holds no behavior beyond small
//! accessors -- state machines live in `semester-gauges` and
//! `semester-core`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for session identifiers
//! - [`enums`] -- Gauge kinds, character types, player and session states
//! - [`deltas`] -- Per-gauge signed amounts ([`GaugeDeltas`])
//! - [`events`] -- Serializable mirror of every observer callback ([`ObserverEvent`])

pub mod deltas;
pub mod enums;
pub mod events;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use deltas::GaugeDeltas;
pub use enums::{CharacterType, GaugeKind, PlayerState, SessionOutcome, SessionState};
pub use events::ObserverEvent;
pub use ids::SessionId;

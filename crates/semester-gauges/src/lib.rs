//! Gauge state machine, observers, and character templates for the
//! Semester simulation.
//!
//! This crate contains the resource logic -- everything that operates on a
//! single gauge without knowing about time, levels, or I/O. It sits between
//! `semester-types` (which defines the shared vocabulary) and
//! `semester-core` (which drives gauges from a session countdown).
//!
//! # Modules
//!
//! - [`config`] -- Per-gauge settings ([`GaugeSettings`]) and their validation
//! - [`error`] -- Error types for gauge construction ([`GaugeError`])
//! - [`gauge`] -- The bounded, observable gauge ([`Gauge`])
//! - [`observer`] -- Callback seam ([`GaugeObserver`]) and a recording implementation
//! - [`template`] -- Character templates that scale deltas ([`CharacterTemplate`])

pub mod config;
pub mod error;
pub mod gauge;
pub mod observer;
pub mod template;

// Re-export primary types at crate root for convenience.
pub use config::GaugeSettings;
pub use error::GaugeError;
pub use gauge::Gauge;
pub use observer::{GaugeObserver, NoOpObserver, RecordingObserver};
pub use template::CharacterTemplate;

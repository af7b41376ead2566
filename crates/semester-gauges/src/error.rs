//! Error types for the semester-gauges crate.
//!
//! Gauges never fail at runtime -- out-of-range writes are clamped. The only
//! failures are malformed settings detected at construction, before a
//! session is allowed to start.

use semester_types::GaugeKind;

/// Errors that can occur while building a gauge or a template.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaugeError {
    /// A numeric setting is NaN or infinite.
    #[error("{kind} gauge: {field} must be finite (got {value})")]
    NonFinite {
        /// The gauge being configured.
        kind: GaugeKind,
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Thresholds are inconsistent with each other or with the bounds.
    #[error("{kind} gauge: invalid thresholds: {reason}")]
    InvalidThresholds {
        /// The gauge being configured.
        kind: GaugeKind,
        /// Explanation of what is wrong.
        reason: String,
    },

    /// A character template multiplier is NaN or infinite.
    #[error("template '{template}': {kind} multiplier must be finite (got {value})")]
    InvalidMultiplier {
        /// Template name.
        template: String,
        /// Gauge the multiplier applies to.
        kind: GaugeKind,
        /// The rejected value.
        value: f32,
    },
}

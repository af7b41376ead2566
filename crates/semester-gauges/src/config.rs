//! Configuration for a single gauge.
//!
//! [`GaugeSettings`] mirrors the `gauges.<kind>` entries of
//! `semester-config.yaml`. Every field has a default so a config file only
//! needs to name what differs.

use semester_types::GaugeKind;
use serde::Deserialize;

use crate::error::GaugeError;

/// Tunable parameters of one gauge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GaugeSettings {
    /// Which resource this gauge represents.
    pub kind: GaugeKind,

    /// Starting value (default: 50).
    #[serde(default = "default_default_value")]
    pub default_value: f32,

    /// At or below this value the gauge is in warning (default: 25).
    #[serde(default = "default_warning_value")]
    pub warning_value: f32,

    /// Upper bound (default: 100).
    #[serde(default = "default_max_value")]
    pub max_value: f32,

    /// Message emitted when the gauge reaches zero.
    #[serde(default = "default_terminal_reason")]
    pub terminal_reason: String,
}

impl GaugeSettings {
    /// Default settings for the given kind.
    pub fn for_kind(kind: GaugeKind) -> Self {
        Self {
            kind,
            default_value: default_default_value(),
            warning_value: default_warning_value(),
            max_value: default_max_value(),
            terminal_reason: default_terminal_reason(),
        }
    }

    /// Check that the settings describe a usable gauge.
    ///
    /// Requires finite numbers, `max_value > 0`,
    /// `0 <= warning_value <= max_value`, and a positive default. A gauge
    /// that starts at zero would have no transition into zero to report.
    pub fn validate(&self) -> Result<(), GaugeError> {
        for (field, value) in [
            ("default_value", self.default_value),
            ("warning_value", self.warning_value),
            ("max_value", self.max_value),
        ] {
            if !value.is_finite() {
                return Err(GaugeError::NonFinite {
                    kind: self.kind,
                    field,
                    value,
                });
            }
        }

        if self.max_value <= 0.0 {
            return Err(GaugeError::InvalidThresholds {
                kind: self.kind,
                reason: format!("max_value must be positive (got {})", self.max_value),
            });
        }
        if self.warning_value < 0.0 || self.warning_value > self.max_value {
            return Err(GaugeError::InvalidThresholds {
                kind: self.kind,
                reason: format!(
                    "warning_value {} outside [0, {}]",
                    self.warning_value, self.max_value
                ),
            });
        }
        if self.default_value <= 0.0 {
            return Err(GaugeError::InvalidThresholds {
                kind: self.kind,
                reason: format!("default_value must be positive (got {})", self.default_value),
            });
        }
        Ok(())
    }
}

const fn default_default_value() -> f32 {
    50.0
}

const fn default_warning_value() -> f32 {
    25.0
}

const fn default_max_value() -> f32 {
    100.0
}

fn default_terminal_reason() -> String {
    String::from("You got [reason]")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        for kind in GaugeKind::ALL {
            let settings = GaugeSettings::for_kind(kind);
            assert!(settings.validate().is_ok());
            assert_eq!(settings.max_value, 100.0);
            assert_eq!(settings.warning_value, 25.0);
            assert_eq!(settings.default_value, 50.0);
        }
    }

    #[test]
    fn warning_above_max_is_rejected() {
        let settings = GaugeSettings {
            warning_value: 120.0,
            ..GaugeSettings::for_kind(GaugeKind::Happiness)
        };
        assert!(matches!(
            settings.validate(),
            Err(GaugeError::InvalidThresholds {
                kind: GaugeKind::Happiness,
                ..
            })
        ));
    }

    #[test]
    fn zero_max_is_rejected() {
        let settings = GaugeSettings {
            max_value: 0.0,
            warning_value: 0.0,
            ..GaugeSettings::for_kind(GaugeKind::Fatigue)
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn depleted_default_is_rejected() {
        for default_value in [0.0, -0.0, -5.0] {
            let settings = GaugeSettings {
                default_value,
                ..GaugeSettings::for_kind(GaugeKind::Happiness)
            };
            assert!(matches!(
                settings.validate(),
                Err(GaugeError::InvalidThresholds {
                    kind: GaugeKind::Happiness,
                    ..
                })
            ));
        }
    }

    #[test]
    fn nan_default_is_rejected() {
        let settings = GaugeSettings {
            default_value: f32::NAN,
            ..GaugeSettings::for_kind(GaugeKind::Grades)
        };
        assert!(matches!(
            settings.validate(),
            Err(GaugeError::NonFinite {
                field: "default_value",
                ..
            })
        ));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: GaugeSettings =
            serde_json::from_str(r#"{"kind": "fatigue", "terminal_reason": "You collapsed"}"#)
                .unwrap();
        assert_eq!(settings.kind, GaugeKind::Fatigue);
        assert_eq!(settings.default_value, 50.0);
        assert_eq!(settings.terminal_reason, "You collapsed");
    }
}

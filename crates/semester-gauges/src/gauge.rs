//! The bounded, observable gauge.
//!
//! A [`Gauge`] holds one resource value in `[0, max_value]` and reports
//! three kinds of change to a [`GaugeObserver`]:
//!
//! - every write (`on_value_changed`),
//! - crossings of the warning / requirement thresholds
//!   (`on_warning_changed`), exactly once per crossing,
//! - the transition into zero (`on_terminal`), exactly once per transition.
//!
//! # Threshold model
//!
//! The warning threshold flags "dangerously low". The optional requirement
//! flags "below the passing bar" and is only used for Grades. The two flags
//! are mutually exclusive: warning takes precedence, and each transition
//! fires a single callback rather than one per write while the condition
//! holds.
//!
//! Warning state is not evaluated at construction, even when the default
//! value already sits at or below the warning threshold. The first write
//! after construction is what raises it.

use semester_types::GaugeKind;
use tracing::warn;

use crate::config::GaugeSettings;
use crate::error::GaugeError;
use crate::observer::GaugeObserver;

/// A single clamped resource value with threshold notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    kind: GaugeKind,
    value: f32,
    max_value: f32,
    warning_value: f32,
    requirement: Option<f32>,
    is_warning: bool,
    is_below_requirement: bool,
    terminal_reason: String,
}

impl Gauge {
    /// Build a gauge and announce its initial value.
    ///
    /// The default value is clamped to `max_value`, then
    /// `on_value_changed` fires once. A `requirement` of `Some(0.0)` is
    /// treated as no requirement.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError`] if the settings or the requirement are
    /// malformed (non-finite, or outside `[0, max_value]`).
    pub fn new(
        settings: &GaugeSettings,
        requirement: Option<f32>,
        observer: &mut dyn GaugeObserver,
    ) -> Result<Self, GaugeError> {
        settings.validate()?;
        let requirement = checked_requirement(settings, requirement)?;

        let gauge = Self {
            kind: settings.kind,
            value: settings.default_value.min(settings.max_value),
            max_value: settings.max_value,
            warning_value: settings.warning_value,
            requirement,
            is_warning: false,
            is_below_requirement: false,
            terminal_reason: settings.terminal_reason.clone(),
        };

        observer.on_value_changed(gauge.value, gauge.max_value, gauge.kind);
        Ok(gauge)
    }

    /// Write a new value.
    ///
    /// Writing the exact current value is a no-op with no callbacks. Any
    /// other value is clamped to `[0, max_value]`, threshold transitions are
    /// reported, the zero transition is reported, and `on_value_changed`
    /// always fires last. NaN is ignored.
    // Exact comparison: -0.0 and 0.0 count as the same value.
    #[allow(clippy::float_cmp)]
    pub fn set_value(&mut self, new_value: f32, observer: &mut dyn GaugeObserver) {
        if new_value.is_nan() {
            warn!(kind = %self.kind, "Ignoring NaN gauge write");
            return;
        }
        if new_value == self.value {
            return;
        }

        let previous = self.value;
        self.value = new_value.min(self.max_value);

        self.update_thresholds(observer);

        if self.value <= 0.0 {
            self.value = 0.0;
            if previous > 0.0 {
                observer.on_terminal(false, &self.terminal_reason);
            }
        }

        observer.on_value_changed(self.value, self.max_value, self.kind);
    }

    /// Add a signed delta to the current value (`value += delta`).
    pub fn add(&mut self, delta: f32, observer: &mut dyn GaugeObserver) {
        self.set_value(self.value + delta, observer);
    }

    /// Re-derive the warning / requirement flags after a write.
    ///
    /// First matching row wins; each row only fires on a transition.
    fn update_thresholds(&mut self, observer: &mut dyn GaugeObserver) {
        let value = self.value;
        let at_or_below_requirement = self.requirement.is_some_and(|req| value <= req);
        let above_requirement = self.requirement.is_some_and(|req| value > req);

        if value <= self.warning_value && !self.is_warning {
            self.is_warning = true;
            self.is_below_requirement = false;
            observer.on_warning_changed(true, self.kind, false);
        } else if at_or_below_requirement && !self.is_below_requirement {
            self.is_below_requirement = true;
            self.is_warning = false;
            observer.on_warning_changed(false, self.kind, true);
        } else if (self.is_warning && value > self.warning_value)
            || (self.is_below_requirement && above_requirement)
        {
            self.is_warning = false;
            self.is_below_requirement = false;
            observer.on_warning_changed(false, self.kind, false);
        }
    }

    /// Which resource this gauge represents.
    pub const fn kind(&self) -> GaugeKind {
        self.kind
    }

    /// Current value, always within `[0, max_value]`.
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Upper bound.
    pub const fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Warning threshold.
    pub const fn warning_value(&self) -> f32 {
        self.warning_value
    }

    /// Requirement threshold, if any.
    pub const fn requirement(&self) -> Option<f32> {
        self.requirement
    }

    /// Whether the gauge is at or below its warning threshold.
    pub const fn is_warning(&self) -> bool {
        self.is_warning
    }

    /// Whether the gauge is at or below its requirement (and not in warning).
    pub const fn is_below_requirement(&self) -> bool {
        self.is_below_requirement
    }

    /// Message emitted when the gauge reaches zero.
    pub fn terminal_reason(&self) -> &str {
        &self.terminal_reason
    }

    /// Current value as a fraction of `max_value`, for progress bars.
    pub fn fraction(&self) -> f32 {
        (self.value / self.max_value).clamp(0.0, 1.0)
    }

    /// Whether the gauge has hit zero.
    pub fn is_depleted(&self) -> bool {
        self.value <= 0.0
    }
}

/// Validate and normalize a requirement threshold.
fn checked_requirement(
    settings: &GaugeSettings,
    requirement: Option<f32>,
) -> Result<Option<f32>, GaugeError> {
    let Some(req) = requirement else {
        return Ok(None);
    };
    if !req.is_finite() {
        return Err(GaugeError::NonFinite {
            kind: settings.kind,
            field: "requirement",
            value: req,
        });
    }
    if req < 0.0 || req > settings.max_value {
        return Err(GaugeError::InvalidThresholds {
            kind: settings.kind,
            reason: format!("requirement {req} outside [0, {}]", settings.max_value),
        });
    }
    if req == 0.0 {
        return Ok(None);
    }
    Ok(Some(req))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use semester_types::ObserverEvent;

    use super::*;
    use crate::observer::RecordingObserver;

    fn grades_settings() -> GaugeSettings {
        GaugeSettings {
            kind: GaugeKind::Grades,
            default_value: 50.0,
            warning_value: 25.0,
            max_value: 100.0,
            terminal_reason: String::from("You got expelled"),
        }
    }

    /// Build a gauge and discard the construction callback.
    fn gauge_with(requirement: Option<f32>, obs: &mut RecordingObserver) -> Gauge {
        let gauge = Gauge::new(&grades_settings(), requirement, obs).unwrap();
        obs.clear();
        gauge
    }

    #[test]
    fn construction_announces_initial_value_once() {
        let mut obs = RecordingObserver::new();
        let gauge = Gauge::new(&grades_settings(), None, &mut obs).unwrap();
        assert_eq!(gauge.value(), 50.0);
        assert_eq!(
            obs.events,
            vec![ObserverEvent::ValueChanged {
                kind: GaugeKind::Grades,
                value: 50.0,
                max: 100.0,
            }]
        );
    }

    #[test]
    fn construction_clamps_default_to_max() {
        let settings = GaugeSettings {
            default_value: 150.0,
            ..grades_settings()
        };
        let gauge = Gauge::new(&settings, None, &mut RecordingObserver::new()).unwrap();
        assert_eq!(gauge.value(), 100.0);
    }

    #[test]
    fn construction_does_not_evaluate_warning() {
        let settings = GaugeSettings {
            default_value: 10.0,
            ..grades_settings()
        };
        let mut obs = RecordingObserver::new();
        let mut gauge = Gauge::new(&settings, None, &mut obs).unwrap();

        assert!(!gauge.is_warning());
        assert!(obs.warnings().is_empty());
        assert_eq!(obs.events.len(), 1);

        // The first write raises the warning that construction skipped.
        gauge.set_value(12.0, &mut obs);
        assert!(gauge.is_warning());
        assert_eq!(obs.warnings(), vec![(true, GaugeKind::Grades, false)]);
    }

    #[test]
    fn writes_are_clamped_to_bounds() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);
        for v in [
            -1000.0,
            -0.5,
            0.0,
            12.5,
            100.0,
            250.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::MAX,
        ] {
            gauge.set_value(v, &mut obs);
            assert!(gauge.value() >= 0.0, "value {} below zero after {v}", gauge.value());
            assert!(gauge.value() <= 100.0, "value {} above max after {v}", gauge.value());
        }
    }

    #[test]
    fn equal_write_is_silent() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);
        gauge.set_value(50.0, &mut obs);
        assert!(obs.events.is_empty());

        gauge.set_value(42.0, &mut obs);
        obs.clear();
        gauge.set_value(42.0, &mut obs);
        assert!(obs.events.is_empty());
    }

    #[test]
    fn nan_write_is_ignored() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);
        gauge.set_value(f32::NAN, &mut obs);
        assert_eq!(gauge.value(), 50.0);
        assert!(obs.events.is_empty());
    }

    #[test]
    fn plain_write_only_reports_value() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);
        gauge.add(-5.0, &mut obs);
        assert_eq!(
            obs.events,
            vec![ObserverEvent::ValueChanged {
                kind: GaugeKind::Grades,
                value: 45.0,
                max: 100.0,
            }]
        );
    }

    #[test]
    fn warning_fires_once_per_crossing() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);

        gauge.set_value(25.0, &mut obs);
        assert_eq!(obs.warnings(), vec![(true, GaugeKind::Grades, false)]);
        assert!(gauge.is_warning());

        obs.clear();
        gauge.set_value(25.0, &mut obs);
        assert!(obs.events.is_empty());

        gauge.set_value(20.0, &mut obs);
        assert!(obs.warnings().is_empty());

        obs.clear();
        gauge.set_value(30.0, &mut obs);
        assert_eq!(obs.warnings(), vec![(false, GaugeKind::Grades, false)]);
        assert!(!gauge.is_warning());
    }

    #[test]
    fn requirement_and_warning_are_exclusive() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(Some(40.0), &mut obs);

        gauge.set_value(35.0, &mut obs);
        assert_eq!(obs.warnings(), vec![(false, GaugeKind::Grades, true)]);
        assert!(gauge.is_below_requirement());
        assert!(!gauge.is_warning());

        obs.clear();
        gauge.set_value(20.0, &mut obs);
        assert_eq!(obs.warnings(), vec![(true, GaugeKind::Grades, false)]);
        assert!(gauge.is_warning());
        assert!(!gauge.is_below_requirement());

        // Climbing out of warning but still under the bar switches flags.
        obs.clear();
        gauge.set_value(30.0, &mut obs);
        assert_eq!(obs.warnings(), vec![(false, GaugeKind::Grades, true)]);
        assert!(gauge.is_below_requirement());
        assert!(!gauge.is_warning());

        obs.clear();
        gauge.set_value(45.0, &mut obs);
        assert_eq!(obs.warnings(), vec![(false, GaugeKind::Grades, false)]);
        assert!(!gauge.is_below_requirement());
        assert!(!gauge.is_warning());
    }

    #[test]
    fn flags_never_both_set_over_a_sweep() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(Some(40.0), &mut obs);
        let mut v = 100.0_f32;
        while v >= -10.0 {
            gauge.set_value(v, &mut obs);
            assert!(!(gauge.is_warning() && gauge.is_below_requirement()));
            v -= 3.5;
        }
        while v <= 110.0 {
            gauge.set_value(v, &mut obs);
            assert!(!(gauge.is_warning() && gauge.is_below_requirement()));
            v += 4.0;
        }
    }

    #[test]
    fn zero_requirement_means_none() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(Some(0.0), &mut obs);
        assert_eq!(gauge.requirement(), None);
        gauge.set_value(35.0, &mut obs);
        assert!(obs.warnings().is_empty());
    }

    #[test]
    fn requirement_out_of_range_is_rejected() {
        let result = Gauge::new(&grades_settings(), Some(140.0), &mut RecordingObserver::new());
        assert!(matches!(result, Err(GaugeError::InvalidThresholds { .. })));

        let result = Gauge::new(
            &grades_settings(),
            Some(f32::NAN),
            &mut RecordingObserver::new(),
        );
        assert!(matches!(result, Err(GaugeError::NonFinite { .. })));
    }

    #[test]
    fn zero_fires_terminal_once() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);

        gauge.set_value(0.0, &mut obs);
        assert_eq!(obs.terminals(), vec![(false, String::from("You got expelled"))]);
        assert!(gauge.is_depleted());

        obs.clear();
        gauge.set_value(0.0, &mut obs);
        assert!(obs.events.is_empty());

        // Writes that clamp back to zero do not re-signal either.
        gauge.add(-5.0, &mut obs);
        assert!(obs.terminals().is_empty());
        assert_eq!(gauge.value(), 0.0);
    }

    #[test]
    fn overshooting_below_zero_fires_terminal_with_value_last() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);
        gauge.add(-80.0, &mut obs);

        assert_eq!(
            obs.events,
            vec![
                ObserverEvent::WarningChanged {
                    kind: GaugeKind::Grades,
                    is_warning: true,
                    is_below_requirement: false,
                },
                ObserverEvent::Terminal {
                    is_victory: false,
                    reason: String::from("You got expelled"),
                },
                ObserverEvent::ValueChanged {
                    kind: GaugeKind::Grades,
                    value: 0.0,
                    max: 100.0,
                },
            ]
        );
    }

    #[test]
    fn recovering_from_zero_rearms_terminal() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);
        gauge.set_value(0.0, &mut obs);
        gauge.set_value(10.0, &mut obs);
        gauge.set_value(0.0, &mut obs);
        assert_eq!(obs.terminals().len(), 2);
    }

    #[test]
    fn fraction_tracks_value() {
        let mut obs = RecordingObserver::new();
        let mut gauge = gauge_with(None, &mut obs);
        assert_eq!(gauge.fraction(), 0.5);
        gauge.set_value(25.0, &mut obs);
        assert_eq!(gauge.fraction(), 0.25);
    }
}

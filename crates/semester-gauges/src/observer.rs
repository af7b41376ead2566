//! Callback seam between gauges and whoever displays them.
//!
//! Gauges never hold on to their observer. The owner passes a
//! `&mut dyn GaugeObserver` into every call that may notify, so the same
//! observer can watch all three gauges without shared ownership.

use semester_types::{ObserverEvent, GaugeKind};

/// Receives gauge notifications synchronously, inside the mutating call.
pub trait GaugeObserver {
    /// A gauge's value was written (also called once at construction).
    fn on_value_changed(&mut self, value: f32, max: f32, kind: GaugeKind);

    /// A gauge crossed its warning or requirement threshold.
    fn on_warning_changed(&mut self, is_warning: bool, kind: GaugeKind, is_below_requirement: bool);

    /// A terminal state was reached. Gauges only ever report `false`.
    fn on_terminal(&mut self, is_victory: bool, reason: &str);
}

/// An observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl GaugeObserver for NoOpObserver {
    fn on_value_changed(&mut self, _value: f32, _max: f32, _kind: GaugeKind) {}

    fn on_warning_changed(
        &mut self,
        _is_warning: bool,
        _kind: GaugeKind,
        _is_below_requirement: bool,
    ) {
    }

    fn on_terminal(&mut self, _is_victory: bool, _reason: &str) {}
}

/// An observer that records every callback as a [`ObserverEvent`].
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// Callbacks in the order they were received.
    pub events: Vec<ObserverEvent>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Recorded warning transitions as `(is_warning, kind, is_below_requirement)`.
    pub fn warnings(&self) -> Vec<(bool, GaugeKind, bool)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                ObserverEvent::WarningChanged {
                    kind,
                    is_warning,
                    is_below_requirement,
                } => Some((is_warning, kind, is_below_requirement)),
                _ => None,
            })
            .collect()
    }

    /// Recorded terminal events as `(is_victory, reason)`.
    pub fn terminals(&self) -> Vec<(bool, String)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ObserverEvent::Terminal { is_victory, reason } => Some((*is_victory, reason.clone())),
                _ => None,
            })
            .collect()
    }

    /// Recorded value writes for one gauge.
    pub fn values_of(&self, kind: GaugeKind) -> Vec<f32> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                ObserverEvent::ValueChanged {
                    kind: changed,
                    value,
                    ..
                } if changed == kind => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Record an arbitrary event.
    pub fn push(&mut self, event: ObserverEvent) {
        self.events.push(event);
    }
}

impl GaugeObserver for RecordingObserver {
    fn on_value_changed(&mut self, value: f32, max: f32, kind: GaugeKind) {
        self.events.push(ObserverEvent::ValueChanged { kind, value, max });
    }

    fn on_warning_changed(&mut self, is_warning: bool, kind: GaugeKind, is_below_requirement: bool) {
        self.events.push(ObserverEvent::WarningChanged {
            kind,
            is_warning,
            is_below_requirement,
        });
    }

    fn on_terminal(&mut self, is_victory: bool, reason: &str) {
        self.events.push(ObserverEvent::Terminal {
            is_victory,
            reason: reason.to_owned(),
        });
    }
}

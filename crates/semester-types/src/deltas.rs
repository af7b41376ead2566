//! Signed per-gauge amounts.
//!
//! Level ticks and activities both describe their effect on the student as
//! one [`GaugeDeltas`] value. The session scales it by the active character
//! template before handing each component to its gauge.

use serde::{Deserialize, Serialize};

use crate::enums::GaugeKind;

/// One signed amount per gauge. Zero means "leave this gauge alone".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeDeltas {
    /// Amount added to the Grades gauge.
    pub grades: f32,
    /// Amount added to the Happiness gauge.
    pub happiness: f32,
    /// Amount added to the Fatigue gauge.
    pub fatigue: f32,
}

impl GaugeDeltas {
    /// Deltas that touch no gauge.
    pub const ZERO: Self = Self {
        grades: 0.0,
        happiness: 0.0,
        fatigue: 0.0,
    };

    /// Build deltas from the three components.
    pub const fn new(grades: f32, happiness: f32, fatigue: f32) -> Self {
        Self {
            grades,
            happiness,
            fatigue,
        }
    }

    /// The component for the given gauge.
    pub const fn get(&self, kind: GaugeKind) -> f32 {
        match kind {
            GaugeKind::Grades => self.grades,
            GaugeKind::Happiness => self.happiness,
            GaugeKind::Fatigue => self.fatigue,
        }
    }

    /// Iterate over the non-zero components in [`GaugeKind::ALL`] order.
    pub fn non_zero(&self) -> impl Iterator<Item = (GaugeKind, f32)> + '_ {
        GaugeKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|&(_, delta)| delta != 0.0)
    }

    /// Whether every component is finite.
    pub const fn is_finite(&self) -> bool {
        self.grades.is_finite() && self.happiness.is_finite() && self.fatigue.is_finite()
    }
}

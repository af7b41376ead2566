//! Character templates.
//!
//! A template is picked in the main menu and scales every gauge delta for
//! the whole campaign: a studious character might gain grades faster while
//! tiring quicker. Templates never touch gauges directly -- the session
//! scales deltas with [`CharacterTemplate::scale`] before applying them.

use semester_types::{CharacterType, GaugeDeltas, GaugeKind};
use serde::Deserialize;

use crate::error::GaugeError;

/// A selectable character with per-gauge multipliers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CharacterTemplate {
    /// Display name, also used to select the template from config.
    pub name: String,

    /// Archetype label.
    #[serde(default, rename = "type")]
    pub character_type: CharacterType,

    /// Flavor text shown in the selector.
    #[serde(default)]
    pub description: String,

    /// Multiplier applied to Grades deltas (default: 1.0).
    #[serde(default = "default_multiplier")]
    pub grade_multiplier: f32,

    /// Multiplier applied to Happiness deltas (default: 1.0).
    #[serde(default = "default_multiplier")]
    pub happiness_multiplier: f32,

    /// Multiplier applied to Fatigue deltas (default: 1.0).
    #[serde(default = "default_multiplier")]
    pub fatigue_multiplier: f32,
}

impl Default for CharacterTemplate {
    fn default() -> Self {
        Self {
            name: String::from("Student"),
            character_type: CharacterType::default(),
            description: String::new(),
            grade_multiplier: default_multiplier(),
            happiness_multiplier: default_multiplier(),
            fatigue_multiplier: default_multiplier(),
        }
    }
}

impl CharacterTemplate {
    /// The multiplier for one gauge.
    pub const fn multiplier(&self, kind: GaugeKind) -> f32 {
        match kind {
            GaugeKind::Grades => self.grade_multiplier,
            GaugeKind::Happiness => self.happiness_multiplier,
            GaugeKind::Fatigue => self.fatigue_multiplier,
        }
    }

    /// Scale raw deltas by this template. Zero deltas stay zero.
    pub fn scale(&self, raw: &GaugeDeltas) -> GaugeDeltas {
        let scaled = |kind: GaugeKind| {
            let delta = raw.get(kind);
            if delta == 0.0 {
                0.0
            } else {
                delta * self.multiplier(kind)
            }
        };
        GaugeDeltas::new(
            scaled(GaugeKind::Grades),
            scaled(GaugeKind::Happiness),
            scaled(GaugeKind::Fatigue),
        )
    }

    /// Reject non-finite multipliers.
    pub fn validate(&self) -> Result<(), GaugeError> {
        for kind in GaugeKind::ALL {
            let value = self.multiplier(kind);
            if !value.is_finite() {
                return Err(GaugeError::InvalidMultiplier {
                    template: self.name.clone(),
                    kind,
                    value,
                });
            }
        }
        Ok(())
    }
}

const fn default_multiplier() -> f32 {
    1.0
}

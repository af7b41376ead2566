//! Scripted player for headless runs.
//!
//! Whenever the player is idle the autopilot scores each activity by how
//! much it helps the gauges that need it most, and starts the best one.
//! Ties are broken with a seeded RNG so runs are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use semester_core::activity::ActivitySettings;
use semester_core::session::Session;
use semester_types::GaugeKind;

/// Scores within this distance of the best are considered tied.
const TIE_EPSILON: f32 = 1e-3;

/// Extra need added to the outcome gauge while it is under the requirement.
const REQUIREMENT_URGENCY: f32 = 0.5;

/// Chooses activities for an idle player.
#[derive(Debug)]
pub struct Autopilot {
    rng: StdRng,
}

impl Autopilot {
    /// Create an autopilot with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick the most helpful activity, or `None` if none is configured.
    pub fn choose<'a>(
        &mut self,
        session: &Session,
        activities: &'a [ActivitySettings],
    ) -> Option<&'a ActivitySettings> {
        let scored: Vec<(&ActivitySettings, f32)> = activities
            .iter()
            .map(|activity| (activity, score(session, activity)))
            .collect();
        let best = scored
            .iter()
            .map(|&(_, s)| s)
            .fold(f32::NEG_INFINITY, f32::max);

        let candidates: Vec<&ActivitySettings> = scored
            .into_iter()
            .filter(|&(_, s)| best - s <= TIE_EPSILON)
            .map(|(activity, _)| activity)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let pick = self.rng.random_range(0..candidates.len());
        candidates.get(pick).copied()
    }
}

/// Weighted sum of the template-scaled deltas, weighting each gauge by the
/// square of how far it is from full.
fn score(session: &Session, activity: &ActivitySettings) -> f32 {
    let scaled = session.template().scale(&activity.deltas);
    let settings = session.settings();
    GaugeKind::ALL
        .into_iter()
        .map(|kind| {
            let gauge = session.gauge(kind);
            let mut need = 1.0 - gauge.fraction();
            if kind == settings.outcome_gauge && gauge.value() < settings.requirement {
                need += REQUIREMENT_URGENCY;
            }
            scaled.get(kind) * need * need
        })
        .sum()
}

//! End-of-level summary printed as JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use semester_core::session::Session;
use semester_types::{GaugeKind, SessionId, SessionOutcome};
use serde::Serialize;

/// What happened in one level attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Session identifier.
    pub session_id: SessionId,
    /// Level name.
    pub level: String,
    /// Template played.
    pub template: String,
    /// Resolved outcome, `None` if the session was still running.
    pub outcome: Option<SessionOutcome>,
    /// Level ticks applied.
    pub ticks: u64,
    /// Simulated seconds.
    pub elapsed_seconds: f32,
    /// Gauge values at the end.
    pub final_values: BTreeMap<GaugeKind, f32>,
    /// Wall-clock start.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end.
    pub ended_at: DateTime<Utc>,
}

impl SessionReport {
    /// Summarize a session.
    pub fn new(
        level: &str,
        session: &Session,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: session.id(),
            level: level.to_owned(),
            template: session.template().name.clone(),
            outcome: session.state().outcome().cloned(),
            ticks: session.ticks(),
            elapsed_seconds: session.elapsed(),
            final_values: session
                .gauges()
                .iter()
                .map(|gauge| (gauge.kind(), gauge.value()))
                .collect(),
            started_at,
            ended_at,
        }
    }
}

//! Headless engine for the Semester simulation.
//!
//! Plays a whole campaign without a UI: an autopilot picks activities
//! whenever the student is idle, the session countdown runs in fixed
//! frames, and a JSON report is printed to stdout after every level.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$SEMESTER_CONFIG` or `semester-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the campaign for the configured template
//! 4. Play levels until the campaign completes or fails
//! 5. Log the result

mod autopilot;
mod error;
mod observer;
mod report;

use std::path::PathBuf;

use chrono::Utc;
use semester_core::campaign::{Campaign, CampaignStatus};
use semester_core::config::GameConfig;
use semester_types::PlayerState;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;
use crate::error::EngineError;
use crate::observer::LoggingObserver;
use crate::report::SessionReport;

/// Environment variable naming an alternative config file.
const CONFIG_ENV: &str = "SEMESTER_CONFIG";

/// Config file looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "semester-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a level cannot start.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let status = run()?;
    info!(?status, "semester-engine finished");
    Ok(())
}

fn run() -> Result<CampaignStatus, EngineError> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    if source.is_none() {
        info!("Config file not found, using defaults");
    }
    info!(
        source = source.as_deref().unwrap_or("defaults"),
        levels = config.levels.len(),
        templates = config.templates.len(),
        activities = config.activities.len(),
        seed = config.engine.seed,
        frame_dt = config.engine.frame_dt,
        "Configuration loaded"
    );

    // 3. Build the campaign.
    let mut campaign = Campaign::new(&config, config.engine.template.as_deref())?;
    let mut autopilot = Autopilot::new(config.engine.seed);
    let mut observer = LoggingObserver::new();

    // 4. Play levels.
    while let Some(level) = campaign.current_level() {
        let level_name = level.name.clone();
        let started_at = Utc::now();
        let mut session = campaign.start_session(&mut observer)?;

        while session.state().is_running() {
            if session.player_state() == PlayerState::Default
                && let Some(activity) = autopilot.choose(&session, &config.activities)
            {
                debug!(
                    activity = activity.name,
                    elapsed = session.elapsed(),
                    remaining = session.remaining(),
                    "Autopilot choice"
                );
                session.start_activity(activity, &mut observer)?;
            }
            session.advance(config.engine.frame_dt, &mut observer);
        }

        let report = SessionReport::new(&level_name, &session, started_at, Utc::now());
        println!("{}", serde_json::to_string(&report)?);

        campaign.finish_session(&session)?;
    }

    // 5. Log the result.
    info!(
        status = ?campaign.status(),
        levels_cleared = campaign.level_index(),
        terminal_events = observer.terminal_events(),
        "Campaign over"
    );
    Ok(campaign.status())
}

/// Load the game configuration.
///
/// Returns the config and the path it came from, or `None` when the
/// built-in defaults are used.
fn load_config() -> Result<(GameConfig, Option<String>), EngineError> {
    let path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = GameConfig::from_file(&path)?;
        Ok((config, Some(path.display().to_string())))
    } else {
        Ok((GameConfig::default(), None))
    }
}

//! Level progression across sessions.
//!
//! A [`Campaign`] carries the chosen character template from level to
//! level. Each level is played as a fresh [`Session`]; a victory moves on to
//! the next level, a defeat ends the campaign, and a victory on a level
//! flagged `last_level` (or on the final configured level) completes it.

use semester_gauges::CharacterTemplate;
use semester_types::SessionOutcome;
use tracing::info;

use crate::config::{GameConfig, GaugesConfig, LevelSettings};
use crate::session::{Session, SessionError, SessionObserver};

/// Errors that can occur while driving a campaign.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CampaignError {
    /// The configuration has no levels.
    #[error("campaign has no levels")]
    NoLevels,

    /// The requested template does not exist.
    #[error("unknown character template: {0}")]
    UnknownTemplate(String),

    /// The campaign is already completed or failed.
    #[error("campaign is over ({0:?})")]
    Over(CampaignStatus),

    /// A session was handed back before it resolved.
    #[error("session has not ended yet")]
    SessionRunning,

    /// The level's session could not start.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: SessionError,
    },
}

/// Where the campaign stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStatus {
    /// More levels to play.
    InProgress,
    /// Every level passed.
    Completed,
    /// A level was lost.
    Failed,
}

/// An ordered run of levels played with one template.
#[derive(Debug, Clone)]
pub struct Campaign {
    levels: Vec<LevelSettings>,
    gauges: GaugesConfig,
    time_scale: f32,
    template: CharacterTemplate,
    current: usize,
    status: CampaignStatus,
}

impl Campaign {
    /// Build a campaign from configuration.
    ///
    /// `template` selects a template by name; `None` picks the first
    /// configured one, falling back to the default template.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignError::NoLevels`] or
    /// [`CampaignError::UnknownTemplate`].
    pub fn new(config: &GameConfig, template: Option<&str>) -> Result<Self, CampaignError> {
        if config.levels.is_empty() {
            return Err(CampaignError::NoLevels);
        }
        let template = match template {
            Some(name) => config
                .template(name)
                .cloned()
                .ok_or_else(|| CampaignError::UnknownTemplate(name.to_owned()))?,
            None => config.templates.first().cloned().unwrap_or_default(),
        };

        Ok(Self {
            levels: config.levels.clone(),
            gauges: config.gauges.clone(),
            time_scale: config.game.time_scale,
            template,
            current: 0,
            status: CampaignStatus::InProgress,
        })
    }

    /// The level to play next, while the campaign is in progress.
    pub fn current_level(&self) -> Option<&LevelSettings> {
        match self.status {
            CampaignStatus::InProgress => self.levels.get(self.current),
            CampaignStatus::Completed | CampaignStatus::Failed => None,
        }
    }

    /// Zero-based index of the current level.
    pub const fn level_index(&self) -> usize {
        self.current
    }

    /// The template used for every level.
    pub const fn template(&self) -> &CharacterTemplate {
        &self.template
    }

    /// Current status.
    pub const fn status(&self) -> CampaignStatus {
        self.status
    }

    /// Start a session for the current level.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignError::Over`] once the campaign has finished, or
    /// [`CampaignError::Session`] if the level is misconfigured.
    pub fn start_session(
        &self,
        observer: &mut dyn SessionObserver,
    ) -> Result<Session, CampaignError> {
        let level = self
            .current_level()
            .ok_or(CampaignError::Over(self.status))?;
        info!(
            level = level.name,
            index = self.current,
            template = self.template.name,
            "Starting level"
        );
        let session = Session::start(
            level.session_settings(self.time_scale),
            &self.gauges,
            self.template.clone(),
            observer,
        )?;
        Ok(session)
    }

    /// Record the result of a finished session and move the campaign on.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignError::SessionRunning`] if the session has not
    /// resolved, or [`CampaignError::Over`] once the campaign has finished.
    pub fn finish_session(&mut self, session: &Session) -> Result<CampaignStatus, CampaignError> {
        let outcome = session
            .state()
            .outcome()
            .ok_or(CampaignError::SessionRunning)?;
        self.record_outcome(outcome)
    }

    /// Record an outcome for the current level.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignError::Over`] once the campaign has finished.
    pub fn record_outcome(
        &mut self,
        outcome: &SessionOutcome,
    ) -> Result<CampaignStatus, CampaignError> {
        let level = self
            .current_level()
            .ok_or(CampaignError::Over(self.status))?;
        let is_final = level.last_level || self.current.saturating_add(1) >= self.levels.len();

        self.status = match (outcome.is_victory(), is_final) {
            (false, _) => CampaignStatus::Failed,
            (true, true) => CampaignStatus::Completed,
            (true, false) => {
                self.current = self.current.saturating_add(1);
                CampaignStatus::InProgress
            }
        };
        info!(status = ?self.status, level_index = self.current, "Campaign updated");
        Ok(self.status)
    }
}

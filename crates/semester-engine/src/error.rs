//! Error types for the headless engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the campaign
//! loop so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: semester_core::config::ConfigError,
    },

    /// The campaign could not be built or advanced.
    #[error("campaign error: {source}")]
    Campaign {
        /// The underlying campaign error.
        #[from]
        source: semester_core::campaign::CampaignError,
    },

    /// A session rejected an input.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: semester_core::session::SessionError,
    },

    /// A report could not be serialized.
    #[error("report error: {source}")]
    Report {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

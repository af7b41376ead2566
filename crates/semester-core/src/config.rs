//! Configuration loading and typed config structures for the Semester
//! simulation.
//!
//! The canonical configuration lives in `semester-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure and a
//! loader that reads, parses, and validates the file. Every section has
//! defaults, so an empty file yields a playable one-level game.

use std::path::Path;

use semester_gauges::{CharacterTemplate, GaugeError, GaugeSettings};
use semester_types::{GaugeDeltas, GaugeKind};
use serde::Deserialize;

use crate::activity::ActivitySettings;
use crate::session::{SessionError, SessionSettings};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A gauge or template setting is malformed.
    #[error("invalid gauge config: {source}")]
    Gauge {
        /// The underlying gauge error.
        #[from]
        source: GaugeError,
    },

    /// A level or activity cannot produce a valid session.
    #[error("invalid session config: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: SessionError,
    },

    /// A structural problem not tied to one gauge or level.
    #[error("invalid config: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `semester-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Global game settings.
    #[serde(default)]
    pub game: GameSettings,

    /// Settings of the three gauges.
    #[serde(default)]
    pub gauges: GaugesConfig,

    /// Ordered list of levels forming the campaign.
    #[serde(default = "default_levels")]
    pub levels: Vec<LevelSettings>,

    /// Selectable character templates.
    #[serde(default = "default_templates")]
    pub templates: Vec<CharacterTemplate>,

    /// Activities available to the player in every level.
    #[serde(default = "default_activities")]
    pub activities: Vec<ActivitySettings>,

    /// Headless driver settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            gauges: GaugesConfig::default(),
            levels: default_levels(),
            templates: default_templates(),
            activities: default_activities(),
            engine: EngineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error if the values are inconsistent.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error if the values are inconsistent.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for values that would prevent a session from
    /// starting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.gauges.validate()?;

        if self.levels.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "at least one level must be configured".to_owned(),
            });
        }
        for level in &self.levels {
            let settings = level.session_settings(self.game.time_scale);
            settings.validate()?;
            let outcome = self.gauges.settings_for(settings.outcome_gauge);
            if settings.requirement > outcome.max_value {
                return Err(ConfigError::Invalid {
                    reason: format!(
                        "level '{}': requirement {} exceeds {} max {}",
                        level.name, settings.requirement, outcome.kind, outcome.max_value
                    ),
                });
            }
        }

        if self.templates.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "at least one character template must be configured".to_owned(),
            });
        }
        for template in &self.templates {
            template.validate()?;
        }

        for activity in &self.activities {
            activity.validate()?;
        }

        self.engine.validate()?;
        // A frame shorter than one ulp of the duration would stop advancing
        // the elapsed time before the level ends.
        for level in &self.levels {
            if self.engine.frame_dt < level.duration * f32::EPSILON {
                return Err(ConfigError::Invalid {
                    reason: format!(
                        "engine.frame_dt {} is too small to finish level '{}' ({} s)",
                        self.engine.frame_dt, level.name, level.duration
                    ),
                });
            }
        }
        if let Some(ref name) = self.engine.template
            && self.template(name).is_none()
        {
            return Err(ConfigError::Invalid {
                reason: format!("engine.template '{name}' is not a configured template"),
            });
        }
        Ok(())
    }

    /// Look up a template by name.
    pub fn template(&self, name: &str) -> Option<&CharacterTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Look up an activity by name.
    pub fn activity(&self, name: &str) -> Option<&ActivitySettings> {
        self.activities.iter().find(|a| a.name == name)
    }
}

/// Global game settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameSettings {
    /// Seconds per activity tick; activity durations are multiplied by it
    /// (default: 1.0).
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
        }
    }
}

impl GameSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!("game.time_scale must be positive (got {})", self.time_scale),
            });
        }
        Ok(())
    }
}

/// Settings of the three gauges, one slot per kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GaugesConfig {
    /// Grades gauge.
    #[serde(default = "default_grades")]
    pub grades: GaugeSettings,

    /// Happiness gauge.
    #[serde(default = "default_happiness")]
    pub happiness: GaugeSettings,

    /// Fatigue gauge.
    #[serde(default = "default_fatigue")]
    pub fatigue: GaugeSettings,
}

impl Default for GaugesConfig {
    fn default() -> Self {
        Self {
            grades: default_grades(),
            happiness: default_happiness(),
            fatigue: default_fatigue(),
        }
    }
}

impl GaugesConfig {
    /// The settings in the slot for `kind`.
    pub const fn settings_for(&self, kind: GaugeKind) -> &GaugeSettings {
        match kind {
            GaugeKind::Grades => &self.grades,
            GaugeKind::Happiness => &self.happiness,
            GaugeKind::Fatigue => &self.fatigue,
        }
    }

    /// Validate each slot and check it holds the matching kind.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for slot in GaugeKind::ALL {
            let settings = self.settings_for(slot);
            if settings.kind != slot {
                return Err(ConfigError::Invalid {
                    reason: format!("gauges.{slot} is configured with kind '{}'", settings.kind),
                });
            }
            settings.validate()?;
        }
        Ok(())
    }
}

/// One level of the campaign.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelSettings {
    /// Display name.
    #[serde(default = "default_level_name")]
    pub name: String,

    /// Level length in seconds (default: 300).
    #[serde(default = "default_duration")]
    pub duration: f32,

    /// Seconds between two applications of `per_tick` (default: 1.0).
    #[serde(default = "default_tick_interval")]
    pub tick_interval: f32,

    /// Grades needed at the end of the level to pass (default: 50).
    #[serde(default = "default_grades_requirement")]
    pub grades_requirement: f32,

    /// Deltas applied to every gauge each tick.
    #[serde(default = "default_per_tick")]
    pub per_tick: GaugeDeltas,

    /// Passing this level finishes the campaign.
    #[serde(default)]
    pub last_level: bool,

    /// Message shown on victory.
    #[serde(default = "default_victory_message")]
    pub victory_message: String,

    /// Reason shown when grades miss the requirement at the end.
    #[serde(default = "default_defeat_reason")]
    pub defeat_reason: String,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            name: default_level_name(),
            duration: default_duration(),
            tick_interval: default_tick_interval(),
            grades_requirement: default_grades_requirement(),
            per_tick: default_per_tick(),
            last_level: false,
            victory_message: default_victory_message(),
            defeat_reason: default_defeat_reason(),
        }
    }
}

impl LevelSettings {
    /// Session parameters for this level. Grades is always the outcome gauge.
    pub fn session_settings(&self, time_scale: f32) -> SessionSettings {
        SessionSettings {
            duration: self.duration,
            tick_interval: self.tick_interval,
            per_tick: self.per_tick,
            outcome_gauge: GaugeKind::Grades,
            requirement: self.grades_requirement,
            victory_message: self.victory_message.clone(),
            defeat_reason: self.defeat_reason.clone(),
            time_scale,
        }
    }
}

/// Settings for the headless `semester-engine` driver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Seed for the autopilot's tie-breaks (default: 42).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Simulated seconds per frame (default: 0.05).
    #[serde(default = "default_frame_dt")]
    pub frame_dt: f32,

    /// Template to play with; the first configured one when unset.
    #[serde(default)]
    pub template: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            frame_dt: default_frame_dt(),
            template: None,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_dt.is_finite() || self.frame_dt <= 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!("engine.frame_dt must be positive (got {})", self.frame_dt),
            });
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_time_scale() -> f32 {
    1.0
}

fn gauge_defaults(kind: GaugeKind, terminal_reason: &str) -> GaugeSettings {
    GaugeSettings {
        terminal_reason: terminal_reason.to_owned(),
        ..GaugeSettings::for_kind(kind)
    }
}

fn default_grades() -> GaugeSettings {
    gauge_defaults(GaugeKind::Grades, "You got expelled")
}

fn default_happiness() -> GaugeSettings {
    gauge_defaults(GaugeKind::Happiness, "You got depressed")
}

fn default_fatigue() -> GaugeSettings {
    gauge_defaults(GaugeKind::Fatigue, "You got burned out")
}

fn default_levels() -> Vec<LevelSettings> {
    vec![LevelSettings {
        last_level: true,
        ..LevelSettings::default()
    }]
}

fn default_templates() -> Vec<CharacterTemplate> {
    vec![CharacterTemplate::default()]
}

fn default_activities() -> Vec<ActivitySettings> {
    vec![
        ActivitySettings::new("Study", GaugeDeltas::new(3.0, -1.0, -1.5), 4.0),
        ActivitySettings::new("Party", GaugeDeltas::new(-0.5, 3.0, -1.0), 3.0),
        ActivitySettings::new("Sleep", GaugeDeltas::new(0.0, 0.5, 4.0), 5.0),
    ]
}

fn default_level_name() -> String {
    String::from("Semester")
}

const fn default_duration() -> f32 {
    300.0
}

const fn default_tick_interval() -> f32 {
    1.0
}

const fn default_grades_requirement() -> f32 {
    50.0
}

const fn default_per_tick() -> GaugeDeltas {
    GaugeDeltas::new(-0.25, -0.25, -0.25)
}

fn default_victory_message() -> String {
    String::from("You passed the semester")
}

fn default_defeat_reason() -> String {
    String::from("You failed your exams")
}

const fn default_seed() -> u64 {
    42
}

const fn default_frame_dt() -> f32 {
    0.05
}

fn default_log_level() -> String {
    String::from("info")
}

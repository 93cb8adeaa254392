//! Configuration loading and typed config structures for Pandemic Directive.
//!
//! The configuration lives in `directive-config.yaml` next to the binary's
//! working directory. Every section is optional; missing values fall back
//! to the reference scenario's numbers, so an empty file reproduces the
//! canonical game exactly.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "DIRECTIVE_LOG_LEVEL";

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

    /// The configuration parsed but describes an impossible game.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DirectiveConfig {
    /// Starting world-state values.
    #[serde(default)]
    pub initial: InitialConditions,

    /// Natural progression coefficients.
    #[serde(default)]
    pub progression: ProgressionConfig,

    /// Ending evaluation settings.
    #[serde(default)]
    pub endings: EndingConfig,

    /// Critical-mode thresholds.
    #[serde(default)]
    pub critical: CriticalConfig,

    /// Scripted playthrough settings used by the engine binary.
    #[serde(default)]
    pub playthrough: PlaythroughConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DirectiveConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `DIRECTIVE_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.logging.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check that every number is finite and the cross-field constraints hold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_finite = self
            .numeric_fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite());
        if let Some((name, value)) = non_finite {
            return Err(ConfigError::Invalid {
                reason: format!("{name} must be a finite number, got {value}"),
            });
        }
        if self.playthrough.max_days == 0 {
            return Err(ConfigError::Invalid {
                reason: "playthrough.max_days must be at least 1".to_owned(),
            });
        }
        if self.endings.earliest_day == 0 {
            return Err(ConfigError::Invalid {
                reason: "endings.earliest_day must be at least 1".to_owned(),
            });
        }
        if self.critical.exit_at < self.critical.enter_below {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "critical.exit_at ({}) must not be below critical.enter_below ({})",
                    self.critical.exit_at, self.critical.enter_below
                ),
            });
        }
        Ok(())
    }

    /// Every floating-point setting, paired with its YAML path.
    fn numeric_fields(&self) -> [(&'static str, f64); 12] {
        let initial = &self.initial;
        let progression = &self.progression;
        [
            ("initial.infection", initial.infection),
            ("initial.mortality", initial.mortality),
            ("initial.trust", initial.trust),
            ("initial.economy", initial.economy),
            ("initial.healthcare_capacity", initial.healthcare_capacity),
            ("initial.unrest", initial.unrest),
            ("progression.death_factor", progression.death_factor),
            ("progression.healthcare_strain", progression.healthcare_strain),
            ("progression.unrest_drag", progression.unrest_drag),
            ("progression.cost_per_infection", progression.cost_per_infection),
            ("critical.enter_below", self.critical.enter_below),
            ("critical.exit_at", self.critical.exit_at),
        ]
    }
}

/// Starting values of the world state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InitialConditions {
    /// Starting infection level.
    #[serde(default = "default_infection")]
    pub infection: f64,
    /// Starting mortality rate.
    #[serde(default = "default_mortality")]
    pub mortality: f64,
    /// Starting public trust.
    #[serde(default = "default_trust")]
    pub trust: f64,
    /// Starting economic stability.
    #[serde(default = "default_economy")]
    pub economy: f64,
    /// Starting healthcare capacity.
    #[serde(default = "default_healthcare_capacity")]
    pub healthcare_capacity: f64,
    /// Starting civil unrest.
    #[serde(default = "default_unrest")]
    pub unrest: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            infection: default_infection(),
            mortality: default_mortality(),
            trust: default_trust(),
            economy: default_economy(),
            healthcare_capacity: default_healthcare_capacity(),
            unrest: default_unrest(),
        }
    }
}

/// Coefficients of the per-tick natural progression.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ProgressionConfig {
    /// Population loss = infection * mortality * this.
    #[serde(default = "default_death_factor")]
    pub death_factor: f64,
    /// Healthcare loss = infection * this.
    #[serde(default = "default_healthcare_strain")]
    pub healthcare_strain: f64,
    /// Economy loss = unrest * this.
    #[serde(default = "default_unrest_drag")]
    pub unrest_drag: f64,
    /// Cost added = infection * this.
    #[serde(default = "default_cost_per_infection")]
    pub cost_per_infection: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            death_factor: default_death_factor(),
            healthcare_strain: default_healthcare_strain(),
            unrest_drag: default_unrest_drag(),
            cost_per_infection: default_cost_per_infection(),
        }
    }
}

/// Ending evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EndingConfig {
    /// First day on which an ending can be reached.
    #[serde(default = "default_earliest_ending_day")]
    pub earliest_day: u32,
}

impl Default for EndingConfig {
    fn default() -> Self {
        Self {
            earliest_day: default_earliest_ending_day(),
        }
    }
}

/// Critical-mode hysteresis thresholds on population.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CriticalConfig {
    /// Critical mode turns on when population drops below this.
    #[serde(default = "default_critical_enter_below")]
    pub enter_below: f64,
    /// Critical mode turns off once population is at least this.
    #[serde(default = "default_critical_exit_at")]
    pub exit_at: f64,
}

impl Default for CriticalConfig {
    fn default() -> Self {
        Self {
            enter_below: default_critical_enter_below(),
            exit_at: default_critical_exit_at(),
        }
    }
}

/// Scripted playthrough settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaythroughConfig {
    /// Stop after this many ticks if no ending has been reached.
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    /// Choice index to take on each event day (day -> index).
    #[serde(default)]
    pub choices: BTreeMap<u32, usize>,
}

impl Default for PlaythroughConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            choices: BTreeMap::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Override the level with `DIRECTIVE_LOG_LEVEL` when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_level_override(std::env::var(LOG_LEVEL_ENV).ok());
    }

    /// Replace the level when an override is present.
    pub fn apply_level_override(&mut self, level: Option<String>) {
        if let Some(level) = level {
            self.level = level;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

const fn default_infection() -> f64 {
    0.02
}

const fn default_mortality() -> f64 {
    0.01
}

const fn default_trust() -> f64 {
    0.65
}

const fn default_economy() -> f64 {
    0.75
}

const fn default_healthcare_capacity() -> f64 {
    0.8
}

const fn default_unrest() -> f64 {
    0.1
}

const fn default_death_factor() -> f64 {
    0.03
}

const fn default_healthcare_strain() -> f64 {
    0.01
}

const fn default_unrest_drag() -> f64 {
    0.02
}

const fn default_cost_per_infection() -> f64 {
    50.0
}

const fn default_earliest_ending_day() -> u32 {
    25
}

const fn default_critical_enter_below() -> f64 {
    0.50
}

const fn default_critical_exit_at() -> f64 {
    0.55
}

const fn default_max_days() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_owned()
}

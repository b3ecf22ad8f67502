//! Configuration system for RosterForge.
//!
//! Load solver configuration from TOML or YAML to control termination, the
//! search phases and rule weights without code changes.
//!
//! # Examples
//!
//! ```
//! use rosterforge_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     unimproved_seconds_spent_limit = 5
//!
//!     [local_search]
//!     late_acceptance_size = 200
//!
//!     [scoring.weights]
//!     "Site change" = "1000soft"
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.local_search.late_acceptance_size, 200);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use rosterforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("roster.toml").unwrap_or_default();
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use rosterforge_core::HardMediumSoftScore;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub termination: TerminationConfig,

    #[serde(default)]
    pub construction: ConstructionConfig,

    #[serde(default)]
    pub local_search: LocalSearchConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format by extension
    /// (`.yaml`/`.yml` for YAML, TOML otherwise).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the total time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self.termination.minutes_spent_limit = None;
        self
    }

    /// Sets the time limit without improvement.
    pub fn with_unimproved_seconds(mut self, seconds: u64) -> Self {
        self.termination.unimproved_seconds_spent_limit = Some(seconds);
        self
    }

    /// Sets a step limit in addition to the time limits.
    pub fn with_step_count_limit(mut self, steps: u64) -> Self {
        self.termination.step_count_limit = Some(steps);
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_high_demand_site(mut self, site: Uuid) -> Self {
        self.scoring.high_demand_site = Some(site);
        self
    }

    /// Overrides the weight of one rule, e.g. `("Site change", "1000soft")`.
    pub fn with_weight(mut self, rule: impl Into<String>, weight: impl Into<String>) -> Self {
        self.scoring.weights.insert(rule.into(), weight.into());
        self
    }

    /// Returns the total time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// Checks value ranges and parses the weight table. At least one
    /// termination limit must be set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.termination.is_bounded() {
            return Err(ConfigError::Invalid(
                "termination needs a time, unimproved time or step count limit".to_string(),
            ));
        }
        if self.local_search.late_acceptance_size == 0 {
            return Err(ConfigError::Invalid(
                "late_acceptance_size must be at least 1".to_string(),
            ));
        }
        let p = self.local_search.swap_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "swap_probability {} is outside 0..=1",
                p
            )));
        }
        self.scoring.parsed_weights()?;
        Ok(())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Deterministic behavior; requires `random_seed`, otherwise seed 0.
    Reproducible,

    /// Checks the incremental score against a full rescore after every step.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Termination configuration. Any configured limit ends the search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving, added to the seconds.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum seconds without a new best score.
    pub unimproved_seconds_spent_limit: Option<u64>,

    /// Maximum number of local search steps.
    pub step_count_limit: Option<u64>,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            seconds_spent_limit: Some(10),
            minutes_spent_limit: None,
            unimproved_seconds_spent_limit: Some(5),
            step_count_limit: None,
        }
    }
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }

    /// Returns the unimproved time limit as a Duration, if any.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.unimproved_seconds_spent_limit.map(Duration::from_secs)
    }

    /// Returns true if any limit is set. A zero total time counts as unset.
    pub fn is_bounded(&self) -> bool {
        self.time_limit().is_some()
            || self.unimproved_time_limit().is_some()
            || self.step_count_limit.is_some()
    }
}

/// Construction phase configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConstructionConfig {
    /// Skipping construction starts local search from the input assignment.
    pub enabled: bool,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Local search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Size of the late acceptance list.
    pub late_acceptance_size: usize,

    /// Probability of sampling a swap instead of a reassignment.
    pub swap_probability: f64,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            late_acceptance_size: 400,
            swap_probability: 0.3,
        }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Site whose repeated staffing counts toward workload fairness.
    pub high_demand_site: Option<Uuid>,

    /// Rule name to weight, written as a score (`"100hard"`, `"0hard/5000soft"`).
    /// Weights are magnitudes; each rule decides whether it rewards or penalizes.
    pub weights: BTreeMap<String, String>,
}

impl ScoringConfig {
    /// Parses the weight table.
    pub fn parsed_weights(&self) -> Result<Vec<(String, HardMediumSoftScore)>, ConfigError> {
        self.weights
            .iter()
            .map(|(name, text)| {
                text.parse::<HardMediumSoftScore>()
                    .map(|w| (name.clone(), w))
                    .map_err(|e| {
                        ConfigError::Invalid(format!("weight of rule '{}': {}", name, e))
                    })
            })
            .collect()
    }
}

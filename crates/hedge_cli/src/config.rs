//! CLI configuration management.
//!
//! Loads `hedge.toml` (or the path given with `--config`), falls back to
//! defaults when the file is absent, and applies `HEDGE_*` environment
//! variable overrides.
//!
//! ```toml
//! log_level = "info"
//! score_file = "hedge_best.toml"
//!
//! [session]
//! total_days = 60
//! volatility = 0.30
//! sampler = "gaussian"
//! seed = 42
//! ```

use std::path::{Path, PathBuf};

use hedge_models::rng::NormalSampler;
use hedge_session::config::SessionConfig;
use hedge_session::error::SessionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "hedge.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// Session parameters
    #[serde(default)]
    pub session: SessionConfig,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Best-score file path
    #[serde(default = "default_score_file")]
    pub score_file: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_score_file() -> PathBuf {
    PathBuf::from("hedge_best.toml")
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            log_level: default_log_level(),
            score_file: default_score_file(),
        }
    }
}

impl HedgeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Unparseable values are ignored and the existing setting is kept.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(log_level) = lookup("HEDGE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(score_file) = lookup("HEDGE_SCORE_FILE") {
            self.score_file = PathBuf::from(score_file);
        }

        if let Some(seed) = lookup("HEDGE_SEED") {
            if let Ok(seed) = seed.parse() {
                self.session.seed = Some(seed);
            }
        }

        if let Some(days) = lookup("HEDGE_TOTAL_DAYS") {
            self.session.total_days = days.parse().unwrap_or(self.session.total_days);
        }

        if let Some(volatility) = lookup("HEDGE_VOLATILITY") {
            self.session.volatility = volatility.parse().unwrap_or(self.session.volatility);
        }

        if let Some(rate) = lookup("HEDGE_RATE") {
            self.session.rate = rate.parse().unwrap_or(self.session.rate);
        }

        if let Some(sampler) = lookup("HEDGE_SAMPLER") {
            self.session.sampler = match sampler.to_lowercase().as_str() {
                "gaussian" => NormalSampler::Gaussian,
                "irwin_hall" | "irwin-hall" => NormalSampler::IrwinHall,
                _ => self.session.sampler,
            };
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.score_file.as_os_str().is_empty() {
            errors.push("score_file cannot be empty".to_string());
        }

        if let Err(SessionError::InvalidConfig(session_errors)) = self.session.validate() {
            errors.extend(session_errors.into_iter().map(|e| format!("session.{}", e)));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

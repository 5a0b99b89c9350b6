use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configured helper command must contain at least one non-blank
    /// character.
    #[error("Helper command is blank. Omit it entirely to disable resolution")]
    BlankHelperCommand,

    /// The execution deadline cannot be disabled.
    #[error("Invalid helper timeout: {0}. Must be at least 1 second")]
    InvalidTimeout(u64),

    /// Unknown log level string.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format string.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. ~/.config/credhelper/config.yaml (per-user config)
    /// 3. Environment variables (`CREDHELPER_*` prefix, highest priority)
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config").join("credhelper").join("config.yaml");
            figment = figment.merge(Yaml::file(user_config));
        }

        let config: Config = figment
            .merge(Env::prefixed("CREDHELPER_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // A present-but-blank helper command is a misconfiguration, not a
        // disabled feature.
        if let Some(command) = &config.helper.command {
            if command.trim().is_empty() {
                return Err(ConfigError::BlankHelperCommand);
            }
        }

        if config.helper.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.helper.timeout_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

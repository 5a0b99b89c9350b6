use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default interval for refreshing cached API keys (15 minutes).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(900);

/// Main configuration structure for credhelper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Helper command configuration
    #[serde(default)]
    pub helper: HelperConfig,

    /// Cache location configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Helper command configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HelperConfig {
    /// Shell command whose trimmed stdout is the API key. When absent, the
    /// resolver is not invoked at all.
    #[serde(default)]
    pub command: Option<String>,

    /// Seconds a cached key stays fresh; 0 disables caching entirely
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Hard deadline for one helper execution, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL.as_secs()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            command: None,
            refresh_interval_secs: default_refresh_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HelperConfig {
    /// Refresh interval as a [`Duration`].
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Execution deadline as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Cache location configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Directory holding cache files. Defaults to a `.cache` directory under
    /// the per-user credhelper config directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.helper.command.is_none());
        assert_eq!(config.helper.refresh_interval_secs, 900);
        assert_eq!(config.helper.timeout_secs, 10);
        assert!(config.cache.dir.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_duration_accessors() {
        let helper = HelperConfig {
            command: Some("echo key".to_string()),
            refresh_interval_secs: 0,
            timeout_secs: 5,
        };
        assert_eq!(helper.refresh_interval(), Duration::ZERO);
        assert_eq!(helper.timeout(), Duration::from_secs(5));
    }
}

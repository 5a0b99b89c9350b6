//! Domain models for credential resolution.

pub mod config;
pub mod credential;

pub use config::{CacheConfig, Config, HelperConfig, LoggingConfig, DEFAULT_REFRESH_INTERVAL};
pub use credential::{CachedCredential, Secret};

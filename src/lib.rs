//! Credhelper - API-key helper execution and caching
//!
//! Credhelper resolves secrets (API keys) by running a user-configured shell
//! command, enforcing a hard execution deadline with process-tree termination,
//! and caching the result in a per-user file so the helper is not re-run on
//! every request.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, error taxonomy, and port traits
//! - **Service Layer** (`services`): The credential resolver orchestration
//! - **Infrastructure Layer** (`infrastructure`): File cache, isolated shell
//!   execution, configuration loading, and logging
//!
//! # Example
//!
//! ```ignore
//! use credhelper::CredentialResolver;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = CredentialResolver::with_defaults()?;
//!     let secret = resolver
//!         .resolve("pass show openai/api-key", Duration::from_secs(900))
//!         .await?;
//!     println!("{} bytes", secret.expose().len());
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{CacheError, HelperError};
pub use domain::models::{
    CacheConfig, CachedCredential, Config, HelperConfig, LoggingConfig, Secret,
    DEFAULT_REFRESH_INTERVAL,
};
pub use domain::ports::{CredentialCache, HelperRunner};
pub use infrastructure::cache::FileCredentialCache;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::exec::{ShellRunner, DEFAULT_HELPER_TIMEOUT};
pub use services::CredentialResolver;

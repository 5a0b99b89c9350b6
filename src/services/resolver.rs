//! Credential resolution service.
//!
//! Given a helper command and a refresh interval, return a secret: from the
//! file cache while the cached entry is fresh, otherwise by executing the
//! helper under a bounded deadline and writing the result back. Cache
//! failures are absorbed (the cache degrades to "always execute"); execution
//! failures propagate to the caller untouched. There are no retries here;
//! retry policy belongs to the caller.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{CacheError, HelperError, HelperResult};
use crate::domain::models::{Config, HelperConfig, Secret};
use crate::domain::ports::{CredentialCache, HelperRunner};
use crate::infrastructure::cache::FileCredentialCache;
use crate::infrastructure::exec::ShellRunner;
use crate::infrastructure::logging::scrub;

/// Resolves secrets from a configured helper command, consulting a
/// persisted cache before paying for a process execution.
pub struct CredentialResolver {
    cache: Arc<dyn CredentialCache>,
    runner: Arc<dyn HelperRunner>,
}

impl CredentialResolver {
    /// Wire an explicit cache and runner.
    pub fn new(cache: Arc<dyn CredentialCache>, runner: Arc<dyn HelperRunner>) -> Self {
        Self { cache, runner }
    }

    /// Production wiring: file cache under the default per-user directory
    /// and a shell runner with the default 10 second deadline.
    pub fn with_defaults() -> Result<Self, CacheError> {
        Ok(Self::new(
            Arc::new(FileCredentialCache::with_default_dir()?),
            Arc::new(ShellRunner::default()),
        ))
    }

    /// Wiring driven by loaded [`Config`] values.
    pub fn from_config(config: &Config) -> Result<Self, CacheError> {
        let cache = match &config.cache.dir {
            Some(dir) => FileCredentialCache::new(dir.clone()),
            None => FileCredentialCache::with_default_dir()?,
        };
        let runner = ShellRunner::new(config.helper.timeout());
        Ok(Self::new(Arc::new(cache), Arc::new(runner)))
    }

    /// Resolve a secret for `command`, using the cache when fresh.
    ///
    /// A `refresh_interval` of zero disables caching: the helper is executed
    /// on every call. A cache read failure falls through to execution; a
    /// cache write failure is logged and the fresh secret is still returned.
    #[instrument(skip_all, fields(helper = %scrub(command)))]
    pub async fn resolve(
        &self,
        command: &str,
        refresh_interval: Duration,
    ) -> HelperResult<Secret> {
        if command.is_empty() {
            return Err(HelperError::EmptyCommand);
        }

        let cached = match self.cache.read(command) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(%err, "cache read failed, treating as empty");
                None
            }
        };

        if let Some(entry) = cached {
            if entry.is_fresh(refresh_interval, Utc::now()) {
                debug!("serving cached credential");
                return Ok(entry.api_key);
            }
            debug!("cached credential is stale, re-executing helper");
        }

        let secret = self.runner.run(command).await?;

        // Best-effort write-through. A broken cache must not fail a
        // resolution that already has a good secret in hand.
        if let Err(err) = self.cache.write(command, &secret) {
            warn!(%err, "cache write failed, continuing with fresh credential");
        }

        Ok(secret)
    }

    /// Resolve from a [`HelperConfig`] section.
    ///
    /// Returns `Ok(None)` when no helper command is configured, mirroring
    /// how provider clients skip the resolver entirely in that case.
    pub async fn resolve_from_config(
        &self,
        config: &HelperConfig,
    ) -> HelperResult<Option<Secret>> {
        match &config.command {
            None => Ok(None),
            Some(command) => self
                .resolve(command, config.refresh_interval())
                .await
                .map(Some),
        }
    }
}

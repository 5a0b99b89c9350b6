//! Secret material and the persisted cache record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// An API key resolved from a helper command.
///
/// `Debug` is redacted so the value cannot reach a log line or panic message
/// by accident; use [`Secret::expose`] to read it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a resolved secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying secret text.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// One cached helper result, persisted as JSON.
///
/// Field names serialize in camelCase (`apiKey`, `lastFetchTime`,
/// `helperCmd`) to match the on-disk cache format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedCredential {
    /// The resolved API key; never logged.
    pub api_key: Secret,

    /// When the helper last ran successfully.
    pub last_fetch_time: DateTime<Utc>,

    /// The exact helper command string that produced `api_key`. An entry is
    /// only valid for the command it was fetched with.
    pub helper_cmd: String,
}

impl CachedCredential {
    /// Create a fresh entry stamped with the current time.
    pub fn new(helper_cmd: impl Into<String>, api_key: Secret) -> Self {
        Self {
            api_key,
            last_fetch_time: Utc::now(),
            helper_cmd: helper_cmd.into(),
        }
    }

    /// Whether this entry may still be served without re-running the helper.
    ///
    /// A zero `refresh_interval` disables caching: no entry is ever fresh.
    pub fn is_fresh(&self, refresh_interval: Duration, now: DateTime<Utc>) -> bool {
        if refresh_interval.is_zero() {
            return false;
        }

        let age = now.signed_duration_since(self.last_fetch_time);
        // A negative age means the entry was stamped by a clock ahead of
        // ours; treat it as fresh.
        age.to_std().map_or(true, |age| age < refresh_interval)
    }
}

//! Domain errors for credential resolution.

use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced to callers of the resolver.
///
/// No message carries the resolved secret or the helper's captured stderr: a
/// failing helper's diagnostics can themselves contain key material.
#[derive(Debug, Error)]
pub enum HelperError {
    /// The configured helper command string is empty.
    #[error("api_key_helper command is empty")]
    EmptyCommand,

    /// The shell process could not be started.
    #[error("api_key_helper start failed: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// The helper ran but exited with a non-zero status.
    #[error("api_key_helper command failed: {status}")]
    CommandFailed {
        /// Exit status of the helper process.
        status: ExitStatus,
    },

    /// The helper exited successfully but produced only whitespace.
    #[error("api_key_helper command returned empty output")]
    EmptyOutput,

    /// The deadline elapsed before the helper exited. Output produced before
    /// the process tree was terminated is discarded, never returned.
    #[error("api_key_helper command timeout after {limit:?}")]
    TimedOut {
        /// The deadline that was enforced.
        limit: Duration,
    },
}

/// Convenience alias for resolver results.
pub type HelperResult<T> = Result<T, HelperError>;

/// Cache I/O failures.
///
/// The resolver absorbs these: a broken cache degrades to "always execute"
/// and is never surfaced as a resolution failure.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the cache file failed.
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The cache file exists but is not a valid credential record.
    #[error("cache entry is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// No per-user home directory could be determined for the cache.
    #[error("could not determine a per-user cache directory")]
    NoCacheDir,
}

use async_trait::async_trait;

use crate::domain::errors::HelperResult;
use crate::domain::models::Secret;

/// Bounded execution interface for helper commands
///
/// Implementations run the command through a system shell under a hard
/// deadline and must terminate the entire process tree (not just the direct
/// child) when the deadline elapses.
#[async_trait]
pub trait HelperRunner: Send + Sync {
    /// Execute a helper command and return its trimmed stdout
    ///
    /// # Arguments
    /// * `command` - Non-empty shell command text
    ///
    /// # Returns
    /// * `Ok(secret)` - the trimmed, non-empty stdout of a zero-exit run
    /// * `Err(HelperError)` - empty command, spawn failure, non-zero exit,
    ///   empty output, or timeout. Captured stderr is never included.
    async fn run(&self, command: &str) -> HelperResult<Secret>;
}

//! Isolated helper execution.
//!
//! The helper runs through the system shell inside its own process group
//! (Unix) or a kill-on-close job object (Windows), so that a timeout can
//! terminate every descendant the shell fanned out into, not just the shell
//! itself. Killing only the direct child would orphan pipelines and
//! background subshells, which would keep running.
//!
//! One execution races two completion signals: process exit and the
//! deadline. The deadline always wins; output produced by a child that was
//! killed is discarded because it cannot be trusted to be complete.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
use self::unix as platform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
use self::windows as platform;

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::domain::errors::{HelperError, HelperResult};
use crate::domain::models::Secret;
use crate::domain::ports::HelperRunner;

/// Maximum time to wait for a helper command to execute.
pub const DEFAULT_HELPER_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a SIGTERM'd process group gets to exit before SIGKILL (Unix).
#[cfg(unix)]
const TERM_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Executes helper commands through the system shell under a hard deadline.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    /// Runner with an explicit execution deadline.
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_HELPER_TIMEOUT)
    }
}

#[async_trait]
impl HelperRunner for ShellRunner {
    async fn run(&self, command: &str) -> HelperResult<Secret> {
        if command.is_empty() {
            return Err(HelperError::EmptyCommand);
        }
        execute(command, self.timeout).await
    }
}

/// One bounded execution attempt.
async fn execute(command: &str, timeout: Duration) -> HelperResult<Secret> {
    let mut isolation = platform::Isolation::prepare().map_err(HelperError::SpawnFailed)?;

    let mut cmd = platform::shell_command(command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    isolation.harden(&mut cmd);

    let mut child = cmd.spawn().map_err(HelperError::SpawnFailed)?;

    if let Err(err) = isolation.attach(&child) {
        // Without isolation there is no way to guarantee descendants die on
        // timeout; abandon the attempt instead of running unconfined.
        let _ = child.start_kill();
        let _ = child.wait().await;
        return Err(HelperError::SpawnFailed(err));
    }

    // Drain both pipes off-task so a chatty helper cannot fill a pipe buffer
    // and deadlock against wait(). Stderr is discarded: it must never reach
    // an error message, since it can carry secret-bearing diagnostics.
    let stdout_task = child.stdout.take().map(read_to_end);
    if let Some(mut pipe) = child.stderr.take() {
        tokio::spawn(async move {
            let mut sink = tokio::io::sink();
            let _ = tokio::io::copy(&mut pipe, &mut sink).await;
        });
    }

    // Completion means "exited and stdout reached EOF", not just "exited":
    // a backgrounded descendant can inherit the stdout pipe and hold it open
    // past the shell's own exit, and the deadline must still win then.
    let done = async {
        let status = child.wait().await;
        let stdout = match stdout_task {
            Some(task) => task.await.unwrap_or_default(),
            None => Vec::new(),
        };
        (status, stdout)
    };

    tokio::select! {
        (status, stdout) = done => {
            let status = status.map_err(HelperError::SpawnFailed)?;
            finish(status, &stdout)
        }
        () = tokio::time::sleep(timeout) => {
            isolation.terminate(&mut child).await;
            Err(HelperError::TimedOut { limit: timeout })
        }
    }
}

fn read_to_end(mut pipe: tokio::process::ChildStdout) -> JoinHandle<Vec<u8>> {
    tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf).await;
        buf
    })
}

/// Shared completion handling: non-zero exit fails without stderr, empty
/// trimmed stdout fails, anything else is the secret.
fn finish(status: ExitStatus, stdout: &[u8]) -> HelperResult<Secret> {
    if !status.success() {
        return Err(HelperError::CommandFailed { status });
    }

    let text = String::from_utf8_lossy(stdout);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(HelperError::EmptyOutput);
    }

    Ok(Secret::new(trimmed))
}

//! Process-group isolation for Unix targets.
//!
//! The child shell is started as the leader of a fresh process group, so a
//! timeout can signal the whole group: SIGTERM first, a short grace period,
//! then SIGKILL. The child is always reaped afterwards so no zombie is left
//! behind.

use std::io;

use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, Command};
use tracing::debug;

use super::TERM_GRACE_PERIOD;

/// Build the platform shell invocation for a helper command.
pub(super) fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("/bin/sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// Process-group handle for one execution attempt.
pub(super) struct Isolation {
    pgid: Option<Pid>,
}

impl Isolation {
    pub(super) fn prepare() -> io::Result<Self> {
        Ok(Self { pgid: None })
    }

    /// Place the child in its own process group (it becomes the leader).
    pub(super) fn harden(&self, cmd: &mut Command) {
        cmd.process_group(0);
    }

    /// Record the group id once the child exists. The child leads its own
    /// group, so its pid doubles as the pgid.
    pub(super) fn attach(&mut self, child: &Child) -> io::Result<()> {
        self.pgid = child
            .id()
            .and_then(|id| i32::try_from(id).ok())
            .map(Pid::from_raw);
        Ok(())
    }

    /// Two-phase group termination: SIGTERM, grace period, SIGKILL.
    pub(super) async fn terminate(&self, child: &mut Child) {
        let Some(pgid) = self.pgid else {
            // Child already reaped; nothing left to signal.
            let _ = child.wait().await;
            return;
        };

        if let Err(err) = killpg(pgid, Signal::SIGTERM) {
            debug!(%err, "SIGTERM to helper process group failed");
        }

        tokio::select! {
            _ = child.wait() => {}
            () = tokio::time::sleep(TERM_GRACE_PERIOD) => {
                if let Err(err) = killpg(pgid, Signal::SIGKILL) {
                    debug!(%err, "SIGKILL to helper process group failed");
                }
                let _ = child.wait().await;
            }
        }
    }
}

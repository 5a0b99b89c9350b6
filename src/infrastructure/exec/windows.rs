//! Job-object isolation for Windows targets.
//!
//! The child shell is created with `CREATE_BREAKAWAY_FROM_JOB` and assigned
//! to a kill-on-close job object before it is awaited. On timeout the whole
//! job is terminated in one step; job objects need no SIGTERM-style grace
//! period because termination is immediate and unconditional for every
//! process in the job. Closing the handle (on drop) also kills anything
//! still inside the job.

#![allow(unsafe_code)]

use std::io;

use tokio::process::{Child, Command};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::JobObjects::{
    AssignProcessToJobObject, CreateJobObjectW, JobObjectExtendedLimitInformation,
    SetInformationJobObject, TerminateJobObject, JOBOBJECT_EXTENDED_LIMIT_INFORMATION,
    JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE,
};
use windows::Win32::System::Threading::{CREATE_BREAKAWAY_FROM_JOB, CREATE_NEW_PROCESS_GROUP};

/// Build the platform shell invocation for a helper command.
pub(super) fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd.exe");
    cmd.arg("/c").arg(command);
    cmd
}

/// Kill-on-close job object for one execution attempt.
pub(super) struct Isolation {
    job: HANDLE,
}

impl Isolation {
    /// Create the job object up front, before the child exists, so a spawn
    /// that succeeds is always already covered by the job.
    pub(super) fn prepare() -> io::Result<Self> {
        let job = unsafe { CreateJobObjectW(None, PCWSTR::null()) }.map_err(io::Error::other)?;

        let mut info = JOBOBJECT_EXTENDED_LIMIT_INFORMATION::default();
        info.BasicLimitInformation.LimitFlags = JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE;

        let configured = unsafe {
            SetInformationJobObject(
                job,
                JobObjectExtendedLimitInformation,
                std::ptr::addr_of!(info).cast(),
                std::mem::size_of::<JOBOBJECT_EXTENDED_LIMIT_INFORMATION>() as u32,
            )
        };
        if let Err(err) = configured {
            unsafe {
                let _ = CloseHandle(job);
            }
            return Err(io::Error::other(err));
        }

        Ok(Self { job })
    }

    /// Allow the child to break away from any job the parent is already in,
    /// so it can be assigned to ours.
    pub(super) fn harden(&self, cmd: &mut Command) {
        cmd.creation_flags((CREATE_NEW_PROCESS_GROUP | CREATE_BREAKAWAY_FROM_JOB).0);
    }

    /// Put the spawned child into the job.
    pub(super) fn attach(&mut self, child: &Child) -> io::Result<()> {
        let raw = child
            .raw_handle()
            .ok_or_else(|| io::Error::other("child process handle unavailable"))?;
        unsafe { AssignProcessToJobObject(self.job, HANDLE(raw)) }.map_err(io::Error::other)
    }

    /// Terminate every process in the job, then reap the child.
    pub(super) async fn terminate(&self, child: &mut Child) {
        unsafe {
            let _ = TerminateJobObject(self.job, 1);
        }
        let _ = child.wait().await;
    }
}

impl Drop for Isolation {
    fn drop(&mut self) {
        if !self.job.is_invalid() {
            unsafe {
                let _ = CloseHandle(self.job);
            }
        }
    }
}

// Job handles are plain kernel handles; moving them between threads is fine.
unsafe impl Send for Isolation {}
unsafe impl Sync for Isolation {}

//! Forceful termination with a bounded wait for exit.

use super::process::ProcessHandle;
use crate::error::KillerError;
use std::time::Duration;

/// How a kill attempt ended.
#[derive(Debug)]
pub enum KillOutcome {
    /// The process exited within the wait bound.
    Exited,

    /// The kill was requested but the process was still alive after the wait.
    TimedOut,

    /// The kill request, or the wait after it, failed.
    Failed(KillerError),
}

impl KillOutcome {
    pub fn is_exited(&self) -> bool {
        matches!(self, Self::Exited)
    }
}

/// Kills `process` and waits up to `exit_wait` for it to go away.
///
/// Makes exactly one attempt. None of the outcomes is fatal; the caller
/// records the outcome and moves on.
pub fn terminate<H: ProcessHandle + ?Sized>(process: &H, exit_wait: Duration) -> KillOutcome {
    let pid = process.pid();
    tracing::info!(pid, "Attempting to kill process");

    if let Err(e) = process.kill() {
        tracing::error!(pid, error = %e, "Failed to kill process");
        return KillOutcome::Failed(e);
    }

    match process.wait_for_exit(exit_wait) {
        Ok(true) => {
            tracing::info!(pid, "Successfully killed process");
            KillOutcome::Exited
        }
        Ok(false) => {
            tracing::warn!(
                pid,
                wait_secs = exit_wait.as_secs(),
                "Process did not exit within {} seconds after kill attempt",
                exit_wait.as_secs()
            );
            KillOutcome::TimedOut
        }
        Err(e) => {
            tracing::error!(pid, error = %e, "Failed waiting for killed process to exit");
            KillOutcome::Failed(e)
        }
    }
}

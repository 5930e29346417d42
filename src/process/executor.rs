use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;

use libc::pid_t;

use super::{signal, ForegroundHandle, ProcessError, ProcessOutcome};
use crate::shell::parser::CommandDescriptor;

const REDIRECT_MODE: u32 = 0o644;

/// Runs commands that are not built-ins as child processes.
#[derive(Clone)]
pub struct ProcessExecutor {
    foreground: Arc<ForegroundHandle>,
    timeout_secs: u32,
}

impl ProcessExecutor {
    pub fn new(foreground: Arc<ForegroundHandle>, timeout_secs: u32) -> Self {
        Self {
            foreground,
            timeout_secs,
        }
    }

    #[cfg(test)]
    pub(crate) fn foreground(&self) -> &Arc<ForegroundHandle> {
        &self.foreground
    }

    /// Spawns `descriptor` and, unless it is a background command, waits for
    /// it under the foreground countdown.
    ///
    /// The child inherits the current environment and working directory.
    pub fn spawn_process(&self, descriptor: &CommandDescriptor) -> Result<ProcessOutcome, ProcessError> {
        let (program, args) = descriptor
            .args
            .split_first()
            .ok_or_else(|| ProcessError::CommandNotFound(String::new()))?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(target) = &descriptor.redirect {
            command.stdout(Stdio::from(open_redirect(target)?));
        }

        // SAFETY: the hook only calls signal(2), which is async-signal-safe.
        unsafe {
            command.pre_exec(signal::restore_default_interrupt);
        }

        // Exec failures come back from `spawn`, so a failed background
        // command is reported here and never gets a PID line.
        let mut child = command
            .spawn()
            .map_err(|e| ProcessError::from_spawn(program, e))?;
        let pid = child.id();

        if descriptor.background {
            // The child is never waited on; dropping `Child` leaves it running.
            tracing::debug!(pid, program = %program, "started background process");
            return Ok(ProcessOutcome::Background { pid });
        }

        tracing::debug!(pid, program = %program, timeout = self.timeout_secs, "waiting on foreground process");
        let status = {
            let _guard = self.foreground.arm(pid as pid_t, self.timeout_secs);
            child.wait()
        }
        .map_err(ProcessError::Wait)?;

        if let Some(killed) = self.foreground.take_timed_out() {
            tracing::debug!(pid = killed, "foreground process timed out");
            return Ok(ProcessOutcome::TimedOut { pid: killed as u32 });
        }

        tracing::debug!(pid, %status, "foreground process finished");
        Ok(ProcessOutcome::Exited { pid, status })
    }
}

/// Opens the redirection target write-only, creating or truncating it.
fn open_redirect(target: &Path) -> Result<File, ProcessError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(REDIRECT_MODE)
        .open(target)
        .map_err(|source| ProcessError::Redirect {
            path: target.to_path_buf(),
            source,
        })
}

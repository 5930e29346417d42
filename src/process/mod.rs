use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub mod executor;
pub mod signal;

pub use executor::ProcessExecutor;
pub use signal::{ForegroundGuard, ForegroundHandle, SignalRouter};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("{program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot create process: {0}")]
    Spawn(#[source] io::Error),

    #[error("{}: {source}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("wait error: {0}")]
    Wait(#[source] io::Error),

    #[error("cannot install signal handler: {0}")]
    Signal(#[source] io::Error),
}

impl ProcessError {
    /// Sorts a spawn failure into "the program could not be run" versus "no
    /// process could be created".
    pub(crate) fn from_spawn(program: &str, source: io::Error) -> Self {
        match (source.kind(), source.raw_os_error()) {
            (io::ErrorKind::NotFound, _) => ProcessError::CommandNotFound(program.to_string()),
            (io::ErrorKind::PermissionDenied, _) | (_, Some(libc::ENOEXEC)) => {
                ProcessError::Exec {
                    program: program.to_string(),
                    source,
                }
            }
            _ => ProcessError::Spawn(source),
        }
    }
}

/// How a dispatched external command ended, from the shell's point of view.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// Detached; never waited on.
    Background { pid: u32 },
    Exited { pid: u32, status: ExitStatus },
    /// Killed by the foreground countdown.
    TimedOut { pid: u32 },
}

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::process::ProcessError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Flag error: {0}")]
    Flag(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Process(#[from] ProcessError),
}

mod vars;

pub use vars::EnvVars;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("Empty variable name")]
    EmptyName,
    #[error("Empty value for {0}")]
    EmptyValue(String),
    #[error("Invalid variable name: {0}")]
    InvalidName(String),
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),
}

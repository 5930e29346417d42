use super::EnvError;
use std::env;

/// Process environment as seen by the built-ins and the expander.
///
/// Writes go straight to the process environment so children spawned later
/// inherit them; children already running keep the snapshot they forked with.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvVars;

impl EnvVars {
    pub fn new() -> Self {
        Self
    }

    pub fn get(&self, name: &str) -> Option<String> {
        if !Self::is_valid_name(name) {
            return None;
        }
        env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }

    pub fn set(&self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::EmptyName);
        }
        if !Self::is_valid_name(name) {
            return Err(EnvError::InvalidName(name.to_string()));
        }
        if value.is_empty() {
            return Err(EnvError::EmptyValue(name.to_string()));
        }
        if value.contains('\0') {
            return Err(EnvError::InvalidValue("contains a NUL byte"));
        }

        env::set_var(name, value);
        Ok(())
    }

    /// Every `NAME=value` pair in the process environment, in the order the
    /// platform reports them.
    pub fn entries(&self) -> impl Iterator<Item = String> {
        env::vars_os()
            .map(|(name, value)| format!("{}={}", name.to_string_lossy(), value.to_string_lossy()))
    }

    fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && !name.contains(['=', '\0'])
    }
}

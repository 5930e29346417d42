use super::{Command, CommandError, Flow};
use crate::core::env::EnvVars;
use std::io::Write;

#[derive(Clone, Default)]
pub struct EnvCommand {
    vars: EnvVars,
}

impl EnvCommand {
    pub fn new() -> Self {
        Self {
            vars: EnvVars::new(),
        }
    }
}

impl Command for EnvCommand {
    fn execute(&self, args: &[String], out: &mut dyn Write) -> Result<Flow, CommandError> {
        // `env NAME` prints just the value, or nothing when unset.
        if let Some(name) = args.first() {
            if let Some(value) = self.vars.get(name) {
                writeln!(out, "{}", value).map_err(CommandError::io("env"))?;
            }
            return Ok(Flow::Continue);
        }

        for entry in self.vars.entries() {
            writeln!(out, "{}", entry).map_err(CommandError::io("env"))?;
        }
        Ok(Flow::Continue)
    }
}

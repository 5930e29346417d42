use super::{Command, CommandError, Flow};
use std::env;
use std::io::Write;

#[derive(Clone, Copy, Default)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &[String], out: &mut dyn Write) -> Result<Flow, CommandError> {
        let cwd = env::current_dir().map_err(CommandError::io("pwd"))?;
        writeln!(out, "{}", cwd.display()).map_err(CommandError::io("pwd"))?;
        Ok(Flow::Continue)
    }
}

use super::{Command, CommandError, Flow};
use std::io::Write;

#[derive(Clone, Copy, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], _out: &mut dyn Write) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}

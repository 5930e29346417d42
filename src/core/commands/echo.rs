use super::{Command, CommandError, Flow};
use std::io::Write;

/// Every argument is followed by a single space, so output keeps a trailing
/// space before the newline.
#[derive(Clone, Copy, Default)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(&self, args: &[String], out: &mut dyn Write) -> Result<Flow, CommandError> {
        for arg in args {
            write!(out, "{} ", arg).map_err(CommandError::io("echo"))?;
        }
        writeln!(out).map_err(CommandError::io("echo"))?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(args: &[&str]) -> String {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        EchoCommand.execute(&args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_echo_keeps_trailing_space() {
        assert_eq!(echo(&["hello", "world"]), "hello world \n");
    }

    #[test]
    fn test_echo_without_arguments() {
        assert_eq!(echo(&[]), "\n");
    }
}

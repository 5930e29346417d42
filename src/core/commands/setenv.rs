use super::{Command, CommandError, Flow};
use crate::core::env::EnvVars;
use std::io::Write;

#[derive(Clone, Default)]
pub struct SetenvCommand {
    vars: EnvVars,
}

impl SetenvCommand {
    pub fn new() -> Self {
        Self {
            vars: EnvVars::new(),
        }
    }
}

impl Command for SetenvCommand {
    fn execute(&self, args: &[String], _out: &mut dyn Write) -> Result<Flow, CommandError> {
        let assignment = args
            .first()
            .ok_or_else(|| CommandError::usage("setenv", "missing arguments"))?;

        // Split on the first '=' only; the value may contain more of them.
        let (name, value) = assignment
            .split_once('=')
            .filter(|(name, value)| !name.is_empty() && !value.is_empty())
            .ok_or_else(|| CommandError::usage("setenv", "invalid format, use name=value"))?;

        self.vars
            .set(name, value)
            .map_err(|e| CommandError::usage("setenv", e.to_string()))?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn setenv(args: &[&str]) -> Result<Flow, CommandError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        SetenvCommand::new().execute(&args, &mut Vec::new())
    }

    #[test]
    fn test_setenv_basic() {
        setenv(&["ATRIUM_SETENV_BASIC=value"]).unwrap();
        assert_eq!(env::var("ATRIUM_SETENV_BASIC").unwrap(), "value");
    }

    #[test]
    fn test_setenv_splits_on_first_equals() {
        setenv(&["ATRIUM_SETENV_EQ==a=b"]).unwrap();
        assert_eq!(env::var("ATRIUM_SETENV_EQ").unwrap(), "=a=b");
    }

    #[test]
    fn test_setenv_errors() {
        let missing = setenv(&[]).unwrap_err();
        assert_eq!(missing.to_string(), "setenv: missing arguments");

        for bad in ["NOEQUALS", "=value", "ATRIUM_SETENV_NOVALUE="] {
            let err = setenv(&[bad]).unwrap_err();
            assert_eq!(err.to_string(), "setenv: invalid format, use name=value");
        }
        assert!(env::var("ATRIUM_SETENV_NOVALUE").is_err());
    }
}

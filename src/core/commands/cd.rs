use super::{Command, CommandError, Flow};
use std::env;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    /// `~` and `~/rest` resolve against the home directory; anything else is
    /// taken literally.
    fn resolve(&self, path: &str) -> Result<PathBuf, CommandError> {
        let rest = match path.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => return Ok(PathBuf::from(path)),
        };

        let mut home = dirs::home_dir()
            .ok_or_else(|| CommandError::usage("cd", "home directory not found"))?;
        home.extend(rest.split('/').filter(|part| !part.is_empty()));
        Ok(home)
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], _out: &mut dyn Write) -> Result<Flow, CommandError> {
        let path = args
            .first()
            .ok_or_else(|| CommandError::usage("cd", "missing argument"))?;

        let target = self.resolve(path)?;
        env::set_current_dir(&target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                CommandError::usage("cd", format!("{}: No such file or directory", path))
            }
            _ => CommandError::usage("cd", format!("{}: {}", path, e)),
        })?;

        tracing::debug!(dir = %target.display(), "changed directory");
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cd(args: &[&str]) -> Result<Flow, CommandError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        CdCommand::new().execute(&args, &mut Vec::new())
    }

    #[test]
    fn test_cd_missing_argument() {
        let err = cd(&[]).unwrap_err();
        assert_eq!(err.to_string(), "cd: missing argument");
    }

    #[test]
    fn test_cd_invalid() {
        let err = cd(&["/nonexistent/atrium/path"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cd: /nonexistent/atrium/path: No such file or directory"
        );
    }

    #[test]
    fn test_resolve_tilde() {
        let cmd = CdCommand::new();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(cmd.resolve("~").unwrap(), home);
            assert_eq!(cmd.resolve("~/a/b").unwrap(), home.join("a").join("b"));
        }
        assert_eq!(cmd.resolve("~other").unwrap(), PathBuf::from("~other"));
        assert_eq!(cmd.resolve("/tmp").unwrap(), PathBuf::from("/tmp"));
    }
}

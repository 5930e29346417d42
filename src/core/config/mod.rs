use std::env;
use std::path::PathBuf;

use thiserror::Error;

mod loader;
mod paths;

pub use loader::RcLoader;
pub use paths::ConfigPaths;

use crate::flags::Flags;

/// Foreground commands are killed after this many seconds unless overridden.
pub const DEFAULT_TIMEOUT_SECS: u32 = 10;

/// Environment override for the foreground time limit.
pub const TIMEOUT_ENV: &str = "ATRIUM_TIMEOUT";

/// Settings resolved once at startup from flags, environment and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `0` disables the countdown.
    pub timeout_secs: u32,
    pub quiet: bool,
    pub rc_path: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
}

impl Config {
    pub fn from_flags(flags: &Flags) -> Result<Self, ConfigError> {
        Self::resolve(flags, ConfigPaths::new(), env::var(TIMEOUT_ENV).ok())
    }

    fn resolve(
        flags: &Flags,
        paths: ConfigPaths,
        timeout_env: Option<String>,
    ) -> Result<Self, ConfigError> {
        let timeout_secs = match flags.get_value("timeout").cloned().or(timeout_env) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let rc_path = if flags.is_set("norc") {
            None
        } else {
            flags
                .get_value("config")
                .map(PathBuf::from)
                .or(paths.rc_path)
        };

        Ok(Config {
            timeout_secs,
            quiet: flags.is_set("quiet"),
            rc_path,
            history_path: paths.history_path,
        })
    }

    pub fn rc_loader(&self) -> Option<RcLoader> {
        self.rc_path.clone().map(RcLoader::new)
    }
}

fn parse_timeout(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timeout '{0}', expected a whole number of seconds")]
    InvalidTimeout(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(args: &[&str]) -> Flags {
        let mut flags = Flags::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        flags.parse(&args).unwrap();
        flags
    }

    fn paths() -> ConfigPaths {
        ConfigPaths::from_home(Some(PathBuf::from("/home/test")))
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(&flags(&[]), paths(), None).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!config.quiet);
        assert_eq!(config.rc_path, Some(PathBuf::from("/home/test/.atriumrc")));
        assert_eq!(
            config.history_path,
            Some(PathBuf::from("/home/test/.atrium_history"))
        );
    }

    #[test]
    fn test_timeout_precedence() {
        let from_env = Config::resolve(&flags(&[]), paths(), Some("4".into())).unwrap();
        assert_eq!(from_env.timeout_secs, 4);

        let from_flag =
            Config::resolve(&flags(&["-t", "2"]), paths(), Some("4".into())).unwrap();
        assert_eq!(from_flag.timeout_secs, 2);

        let disabled = Config::resolve(&flags(&["--timeout", "0"]), paths(), None).unwrap();
        assert_eq!(disabled.timeout_secs, 0);
    }

    #[test]
    fn test_invalid_timeout() {
        let result = Config::resolve(&flags(&["-t", "soon"]), paths(), None);
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(v)) if v == "soon"));

        let result = Config::resolve(&flags(&[]), paths(), Some("-1".into()));
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn test_rc_overrides() {
        let custom = Config::resolve(&flags(&["-c", "/etc/atriumrc"]), paths(), None).unwrap();
        assert_eq!(custom.rc_path, Some(PathBuf::from("/etc/atriumrc")));

        let skipped =
            Config::resolve(&flags(&["-n", "-c", "/etc/atriumrc"]), paths(), None).unwrap();
        assert_eq!(skipped.rc_path, None);
        assert!(skipped.rc_loader().is_none());
    }

    #[test]
    fn test_no_home_directory() {
        let config = Config::resolve(&flags(&[]), ConfigPaths::from_home(None), None).unwrap();
        assert_eq!(config.rc_path, None);
        assert_eq!(config.history_path, None);
    }
}

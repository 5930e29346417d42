use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// Reads the startup file into the command lines it contains.
#[derive(Debug, Clone)]
pub struct RcLoader {
    path: PathBuf,
}

impl RcLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields no lines. Blank lines and `#` comments are
    /// skipped; everything else is returned verbatim for the dispatcher.
    pub fn load(&self) -> Result<Vec<String>, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no startup file");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        Ok(content
            .lines()
            .filter(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with('#')
            })
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_skips_comments_and_blanks() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(".atriumrc");
        fs::write(&path, "# greeting\n\nsetenv GREETING=hi\n   \n  # indented comment\necho $GREETING\n")?;

        let lines = RcLoader::new(path).load()?;
        assert_eq!(lines, vec!["setenv GREETING=hi", "echo $GREETING"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_empty() -> Result<(), ConfigError> {
        let loader = RcLoader::new(PathBuf::from("/nonexistent/atrium/.atriumrc"));
        assert!(loader.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_unreadable_file_is_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        // A directory cannot be read as a file.
        let loader = RcLoader::new(dir.path().to_path_buf());
        assert!(matches!(loader.load(), Err(ConfigError::Io { .. })));
        Ok(())
    }
}

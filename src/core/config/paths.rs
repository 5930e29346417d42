use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub rc_path: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPaths {
    pub fn new() -> Self {
        Self::from_home(dirs::home_dir())
    }

    pub fn from_home(home: Option<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: home.as_ref().map(|home| home.join(".atriumrc")),
            history_path: home.map(|home| home.join(".atrium_history")),
        }
    }
}

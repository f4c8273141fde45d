use super::EnvError;
use std::path::PathBuf;

pub const HISTORY_FILE: &str = ".posh_history";
pub const RC_FILE: &str = ".poshrc";

/// Per-user locations the shell reads and writes.
#[derive(Debug, Clone)]
pub struct EnvPaths {
    home: PathBuf,
}

impl EnvPaths {
    pub fn new() -> Result<Self, EnvError> {
        let home = std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(EnvError::HomeDirNotFound)?;

        Ok(Self::with_home(home))
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn history_file(&self) -> PathBuf {
        self.home.join(HISTORY_FILE)
    }

    pub fn rc_file(&self) -> PathBuf {
        self.home.join(RC_FILE)
    }
}

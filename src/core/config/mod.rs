use std::{fmt, io::IsTerminal, path::PathBuf};

mod loader;

pub use loader::RcLoader;

use super::env::EnvPaths;
use crate::flags::Flags;
use crate::input::history::DEFAULT_MAX_ENTRIES;

/// Session settings derived from the command line and the user's home.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub argv0: String,
    pub script: Option<PathBuf>,
    pub interactive: bool,
    pub rc_file: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub history_max: usize,
    pub quiet: bool,
}

impl ShellConfig {
    pub fn from_flags(flags: &Flags, argv0: impl Into<String>) -> Self {
        let script = flags.script().map(PathBuf::from);
        let interactive = script.is_none() && std::io::stdin().is_terminal();

        let paths = EnvPaths::new()
            .map_err(|e| log::warn!("{}; history and startup file disabled", e))
            .ok();

        // An explicit --config file is honoured in every mode.
        let rc_file = match flags.get_value("config") {
            Some(path) => Some(PathBuf::from(path)),
            None if interactive && !flags.is_set("norc") => {
                paths.as_ref().map(EnvPaths::rc_file)
            }
            None => None,
        };

        let history_file = if flags.is_set("no-history") {
            None
        } else {
            paths.as_ref().map(EnvPaths::history_file)
        };

        ShellConfig {
            argv0: argv0.into(),
            script,
            interactive,
            rc_file,
            history_file,
            history_max: DEFAULT_MAX_ENTRIES,
            quiet: flags.is_set("quiet"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(path, e) => write!(f, "{}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for ConfigError {}

mod paths;
mod vars;

pub use paths::EnvPaths;
pub use vars::EnvStore;

#[derive(Debug)]
pub enum EnvError {
    HomeDirNotFound,
    VarNotFound(String),
    InvalidName(String),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::HomeDirNotFound => write!(f, "Home directory not found"),
            EnvError::VarNotFound(var) => write!(f, "{} not set", var),
            EnvError::InvalidName(name) => write!(f, "invalid variable name: '{}'", name),
        }
    }
}

impl std::error::Error for EnvError {}

use std::path::PathBuf;

use crate::process::ProcessError;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    ScriptOpen(PathBuf, std::io::Error),
    ProcessError(ProcessError),
    FlagError(String),
}

impl ShellError {
    /// Exit code used when the shell cannot start.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::ScriptOpen(_, e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                crate::process::STATUS_NOT_EXECUTABLE
            }
            ShellError::ScriptOpen(..) => crate::process::STATUS_NOT_FOUND,
            ShellError::FlagError(_) => 2,
            _ => 1,
        }
    }
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::ScriptOpen(path, _) => write!(f, "Can't open {}", path.display()),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
            ShellError::ProcessError(e) => write!(f, "Process error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_startup_exit_codes() {
        let missing = ShellError::ScriptOpen(PathBuf::from("x.sh"), Error::from(ErrorKind::NotFound));
        let denied =
            ShellError::ScriptOpen(PathBuf::from("x.sh"), Error::from(ErrorKind::PermissionDenied));

        assert_eq!(missing.exit_code(), 127);
        assert_eq!(denied.exit_code(), 126);
        assert_eq!(missing.to_string(), "Can't open x.sh");
        assert_eq!(ShellError::FlagError("bad".into()).exit_code(), 2);
        assert_eq!(
            ShellError::Io(Error::from(ErrorKind::BrokenPipe)).exit_code(),
            1
        );
    }
}

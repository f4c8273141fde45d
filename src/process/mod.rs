use std::fmt;

pub mod executor;
pub mod signal;

pub use executor::ProcessExecutor;

pub const STATUS_NOT_FOUND: i32 = 127;
pub const STATUS_NOT_EXECUTABLE: i32 = 126;
pub const STATUS_SIGNAL_BASE: i32 = 128;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    PermissionDenied(String),
    SpawnFailed(String, std::io::Error),
    WaitFailed(std::io::Error),
    SignalError(String),
}

impl ProcessError {
    /// Status recorded for the segment that failed with this error.
    pub fn status(&self) -> i32 {
        match self {
            ProcessError::CommandNotFound(_) => STATUS_NOT_FOUND,
            ProcessError::PermissionDenied(_) | ProcessError::SpawnFailed(..) => {
                STATUS_NOT_EXECUTABLE
            }
            ProcessError::WaitFailed(_) | ProcessError::SignalError(_) => 1,
        }
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(_) => write!(f, "not found"),
            ProcessError::PermissionDenied(_) => write!(f, "Permission denied"),
            ProcessError::SpawnFailed(_, e) => write!(f, "cannot execute: {}", e),
            ProcessError::WaitFailed(e) => write!(f, "wait failed: {}", e),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}

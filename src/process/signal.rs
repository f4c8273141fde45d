use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use signal_hook::consts::SIGINT;

use crate::process::ProcessError;

/// Keeps SIGINT from terminating the shell itself.
///
/// The handler only raises the returned flag. Children get the default
/// disposition back on exec, so an interrupt still stops the foreground child.
pub fn install_interrupt_flag() -> Result<Arc<AtomicBool>, ProcessError> {
    let interrupted = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
        .map_err(|e| ProcessError::SignalError(e.to_string()))?;
    Ok(interrupted)
}

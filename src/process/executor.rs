use std::io::ErrorKind;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{signal, ProcessError, STATUS_SIGNAL_BASE};
use crate::core::env::EnvStore;

/// Runs external programs one at a time, blocking until each one finishes.
pub struct ProcessExecutor {
    interrupted: Option<Arc<AtomicBool>>,
}

impl ProcessExecutor {
    /// `catch_interrupts` installs the SIGINT flag; interactive shells need it so
    /// Ctrl-C during a child does not take the shell down too.
    pub fn new(catch_interrupts: bool) -> Result<Self, ProcessError> {
        let interrupted = if catch_interrupts {
            Some(signal::install_interrupt_flag()?)
        } else {
            None
        };

        Ok(ProcessExecutor { interrupted })
    }

    /// Executes `program` with `args` (`args[0]` is the name the user typed)
    /// and exactly the variables in `env`, returning the exit status.
    pub fn spawn_process(
        &self,
        program: &Path,
        args: &[String],
        env: &EnvStore,
    ) -> Result<i32, ProcessError> {
        let mut command = Command::new(program);
        if let Some((arg0, rest)) = args.split_first() {
            command.arg0(arg0).args(rest);
        }
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(env.iter());

        let name = args
            .first()
            .cloned()
            .unwrap_or_else(|| program.to_string_lossy().into_owned());

        log::debug!("spawning {} as {:?}", program.display(), args);
        let child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProcessError::CommandNotFound(name.clone()),
            ErrorKind::PermissionDenied => ProcessError::PermissionDenied(name.clone()),
            _ => ProcessError::SpawnFailed(name.clone(), e),
        })?;

        self.wait_for_child(child)
    }

    /// The shell's only blocking point while a command runs.
    fn wait_for_child(&self, mut child: Child) -> Result<i32, ProcessError> {
        if let Some(flag) = &self.interrupted {
            flag.store(false, Ordering::SeqCst);
        }

        let pid = child.id();
        let status = child.wait().map_err(ProcessError::WaitFailed)?;

        if let Some(flag) = &self.interrupted {
            if flag.swap(false, Ordering::SeqCst) {
                log::debug!("interrupt received while waiting for pid {}", pid);
            }
        }

        let code = exit_code(status);
        log::debug!("pid {} finished with status {}", pid, code);
        Ok(code)
    }
}

/// Collapses an OS exit status into the shell's small integer status.
pub fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => STATUS_SIGNAL_BASE + signal,
        (None, None) => 1,
    }
}

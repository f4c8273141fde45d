use std::env;
use std::io::Write;
use std::path::PathBuf;

use super::{BuiltinOutcome, Command, CommandError};
use crate::core::state::ShellState;
use crate::path::PathExpander;

#[derive(Clone, Copy, Debug, Default)]
pub struct CdCommand;

impl CdCommand {
    fn home_dir(state: &ShellState) -> Result<PathBuf, CommandError> {
        state
            .env
            .get("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or_else(|| CommandError::ExecutionError("HOME not set".into()))
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        // The current directory may have been removed; that must not stop us leaving it.
        let previous = env::current_dir()
            .ok()
            .map(|dir| dir.to_string_lossy().into_owned())
            .or_else(|| state.env.get("PWD").map(String::from));

        let target = match args.first().map(String::as_str) {
            None => Self::home_dir(state)?,
            Some("-") => PathBuf::from(state.env.require("OLDPWD")?),
            Some(path) if path.starts_with('~') => {
                PathExpander::new(&Self::home_dir(state)?).expand(path)
            }
            Some(path) => PathBuf::from(path),
        };

        env::set_current_dir(&target).map_err(|e| {
            CommandError::ExecutionError(format!("can't cd to {}: {}", target.display(), e))
        })?;

        let current = env::current_dir()
            .unwrap_or(target)
            .to_string_lossy()
            .into_owned();
        match previous {
            Some(previous) => state.env.set("OLDPWD", &previous)?,
            None => {
                log::debug!("previous directory unknown, clearing OLDPWD");
                state.env.unset("OLDPWD");
            }
        }
        state.env.set("PWD", &current)?;

        if args.first().is_some_and(|arg| arg == "-") {
            writeln!(out, "{}", current)?;
        }
        Ok(BuiltinOutcome::Status(0))
    }
}

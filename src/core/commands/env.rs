use std::io::Write;

use super::{BuiltinOutcome, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone, Copy, Debug, Default)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        for (name, value) in state.env.iter() {
            writeln!(out, "{}={}", name, value)?;
        }
        Ok(BuiltinOutcome::Status(0))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SetenvCommand;

impl Command for SetenvCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        let [name, value] = args else {
            return Err(CommandError::InvalidArguments(
                "usage: setenv NAME VALUE".into(),
            ));
        };

        state.env.set(name, value)?;
        Ok(BuiltinOutcome::Status(0))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UnsetenvCommand;

impl Command for UnsetenvCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        let [name] = args else {
            return Err(CommandError::InvalidArguments(
                "usage: unsetenv NAME".into(),
            ));
        };

        if !state.env.unset(name) {
            log::debug!("unsetenv: {} was not set", name);
        }
        Ok(BuiltinOutcome::Status(0))
    }
}

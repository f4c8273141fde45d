use std::io::Write;

use super::{BuiltinOutcome, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone, Copy, Debug, Default)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        for entry in state.history.entries() {
            writeln!(out, "{:>5}  {}", entry.index, entry.line)?;
        }
        Ok(BuiltinOutcome::Status(0))
    }
}

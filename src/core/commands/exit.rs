use std::io::Write;

use super::{BuiltinOutcome, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone, Copy, Debug, Default)]
pub struct ExitCommand;

impl ExitCommand {
    /// Accepts an optional leading `+` and decimal digits that fit in an `i32`.
    fn parse_code(arg: &str) -> Result<i32, CommandError> {
        let digits = arg.strip_prefix('+').unwrap_or(arg);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CommandError::IllegalNumber(arg.to_string()));
        }

        digits
            .parse::<i32>()
            .map_err(|_| CommandError::IllegalNumber(arg.to_string()))
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        let code = match args.first() {
            Some(arg) => Self::parse_code(arg)? & 0xFF,
            None => state.status,
        };
        Ok(BuiltinOutcome::Exit(code))
    }
}

use std::fmt::Display;

use super::aliases::AliasTable;
use super::env::EnvStore;
use crate::input::History;
use crate::shell::chain::ChainOperator;

/// The one mutable session context, owned by the execution loop and lent to
/// every component.
pub struct ShellState {
    pub env: EnvStore,
    pub aliases: AliasTable,
    pub history: History,
    /// Status of the most recently completed segment.
    pub status: i32,
    /// Input lines read so far, used in diagnostics.
    pub line_count: usize,
    /// The name the shell was invoked as.
    pub argv0: String,
    /// Operator in front of the segment about to run.
    pub pending: ChainOperator,
}

impl ShellState {
    pub fn new(argv0: impl Into<String>, env: EnvStore, history: History) -> Self {
        ShellState {
            env,
            aliases: AliasTable::new(),
            history,
            status: 0,
            line_count: 0,
            argv0: argv0.into(),
            pending: ChainOperator::Normal,
        }
    }

    /// Prints `argv0: line: command: message` on stderr.
    pub fn report(&self, command: &str, message: &dyn Display) {
        eprintln!(
            "{}: {}: {}: {}",
            self.argv0, self.line_count, command, message
        );
    }

    /// Prints `argv0: line: message` for errors that belong to the whole line.
    pub fn report_line(&self, message: &dyn Display) {
        eprintln!("{}: {}: {}", self.argv0, self.line_count, message);
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        let env = [("PATH", "/usr/bin:/bin"), ("HOME", "/nonexistent-home")]
            .into_iter()
            .collect();
        ShellState::new("posh", env, History::in_memory(100))
    }
}

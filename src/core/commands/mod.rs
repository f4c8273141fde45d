use std::io::Write;

mod alias;
mod cd;
mod env;
mod exit;
mod help;
mod history;

pub use alias::AliasCommand;
pub use cd::CdCommand;
pub use env::{EnvCommand, SetenvCommand, UnsetenvCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;

use crate::core::env::EnvError;
use crate::core::state::ShellState;

pub const STATUS_ILLEGAL_NUMBER: i32 = 2;

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    IllegalNumber(String),
    ExecutionError(String),
    EnvError(EnvError),
    IoError(std::io::Error),
}

impl CommandError {
    /// Status recorded when a builtin fails.
    pub fn status(&self) -> i32 {
        match self {
            CommandError::IllegalNumber(_) => STATUS_ILLEGAL_NUMBER,
            _ => 1,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::IllegalNumber(arg) => write!(f, "Illegal number: {}", arg),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
            CommandError::EnvError(err) => write!(f, "{}", err),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<EnvError> for CommandError {
    fn from(err: EnvError) -> Self {
        CommandError::EnvError(err)
    }
}

/// What a builtin asks the execution loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    /// Keep running with this status.
    Status(i32),
    /// End the session with this process exit code.
    Exit(i32),
}

/// Shared calling convention of every builtin. `args` excludes the command name.
pub trait Command {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
    Help,
    Env,
    Setenv,
    Unsetenv,
    Alias,
    History,
}

impl Builtin {
    pub const ALL: [Builtin; 8] = [
        Builtin::Exit,
        Builtin::Cd,
        Builtin::Help,
        Builtin::Env,
        Builtin::Setenv,
        Builtin::Unsetenv,
        Builtin::Alias,
        Builtin::History,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Cd => "cd",
            Builtin::Help => "help",
            Builtin::Env => "env",
            Builtin::Setenv => "setenv",
            Builtin::Unsetenv => "unsetenv",
            Builtin::Alias => "alias",
            Builtin::History => "history",
        }
    }
}

impl Command for Builtin {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        match self {
            Builtin::Exit => ExitCommand.execute(state, args, out),
            Builtin::Cd => CdCommand.execute(state, args, out),
            Builtin::Help => HelpCommand.execute(state, args, out),
            Builtin::Env => EnvCommand.execute(state, args, out),
            Builtin::Setenv => SetenvCommand.execute(state, args, out),
            Builtin::Unsetenv => UnsetenvCommand.execute(state, args, out),
            Builtin::Alias => AliasCommand.execute(state, args, out),
            Builtin::History => HistoryCommand.execute(state, args, out),
        }
    }
}

use std::io::Write;

use super::{Builtin, BuiltinOutcome, Command, CommandError};
use crate::core::state::ShellState;

const USAGE: &[(&str, &str)] = &[
    ("cd [DIR | -]", "change the working directory (default $HOME)"),
    ("exit [N]", "leave the shell with status N"),
    ("env", "print the environment"),
    ("setenv NAME VALUE", "set an environment variable"),
    ("unsetenv NAME", "remove an environment variable"),
    ("alias [NAME[=VALUE] ...]", "list, show or define aliases"),
    ("history", "list previous input lines"),
    ("help [BUILTIN]", "show this text"),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(
        &self,
        _state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        if let Some(topic) = args.first() {
            let builtin = Builtin::from_name(topic).ok_or_else(|| {
                CommandError::InvalidArguments(format!("no help topics match '{}'", topic))
            })?;
            let (usage, description) = USAGE
                .iter()
                .find(|(usage, _)| usage.split_whitespace().next() == Some(builtin.name()))
                .ok_or_else(|| CommandError::ExecutionError(format!("no help for {}", topic)))?;
            writeln!(out, "{}: {}", usage, description)?;
            return Ok(BuiltinOutcome::Status(0));
        }

        writeln!(out, "posh {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Commands may be chained with ';', '&&' and '||'.")?;
        writeln!(out, "Built-in commands:")?;
        for (usage, description) in USAGE {
            writeln!(out, "  {:<26} {}", usage, description)?;
        }
        Ok(BuiltinOutcome::Status(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::tests::run;

    #[test]
    fn test_help_lists_every_builtin() {
        let mut state = ShellState::for_tests();
        let (result, out) = run(Builtin::Help, &mut state, &[]);
        assert!(matches!(result, Ok(BuiltinOutcome::Status(0))));
        for builtin in Builtin::ALL {
            assert!(out.contains(builtin.name()), "missing {}", builtin.name());
        }
    }

    #[test]
    fn test_help_topic() {
        let mut state = ShellState::for_tests();
        let (result, out) = run(Builtin::Help, &mut state, &["setenv"]);
        assert!(result.is_ok());
        assert!(out.starts_with("setenv NAME VALUE"));

        let (result, _) = run(Builtin::Help, &mut state, &["ls"]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }
}

use std::io::Write;

use super::{BuiltinOutcome, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone, Copy, Debug, Default)]
pub struct AliasCommand;

enum AliasArg {
    Show(String),
    Define(String, String),
}

impl AliasCommand {
    /// Groups raw arguments: a word containing `=` opens a definition and the
    /// words after it (up to the next `=` word) extend its value.
    fn group_args(args: &[String]) -> Vec<AliasArg> {
        let mut grouped: Vec<AliasArg> = Vec::new();

        for arg in args {
            if let Some((name, value)) = arg.split_once('=') {
                grouped.push(AliasArg::Define(name.to_string(), value.to_string()));
                continue;
            }

            match grouped.last_mut() {
                Some(AliasArg::Define(_, value)) => {
                    value.push(' ');
                    value.push_str(arg);
                }
                _ => grouped.push(AliasArg::Show(arg.clone())),
            }
        }

        grouped
    }

    fn strip_quotes(value: &str) -> &str {
        let value = value.trim();
        let quoted = value.len() >= 2
            && ((value.starts_with('\'') && value.ends_with('\''))
                || (value.starts_with('"') && value.ends_with('"')));
        if quoted {
            &value[1..value.len() - 1]
        } else {
            value
        }
    }

    fn print_alias(out: &mut dyn Write, name: &str, value: &str) -> std::io::Result<()> {
        writeln!(out, "{}='{}'", name, value)
    }
}

impl Command for AliasCommand {
    fn execute(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<BuiltinOutcome, CommandError> {
        if args.is_empty() {
            for (name, value) in state.aliases.iter() {
                Self::print_alias(out, name, value)?;
            }
            return Ok(BuiltinOutcome::Status(0));
        }

        let grouped = Self::group_args(args);
        if grouped
            .iter()
            .any(|arg| matches!(arg, AliasArg::Define(name, _) if name.is_empty()))
        {
            return Err(CommandError::InvalidArguments(
                "usage: alias name=value".to_string(),
            ));
        }

        let mut missing = Vec::new();
        for arg in grouped {
            match arg {
                AliasArg::Define(name, value) => {
                    let value = Self::strip_quotes(&value);
                    if value.is_empty() {
                        state.aliases.remove(&name);
                    } else {
                        state.aliases.add(&name, value);
                    }
                }
                AliasArg::Show(name) => match state.aliases.get(&name) {
                    Some(value) => Self::print_alias(out, &name, value)?,
                    None => missing.push(name),
                },
            }
        }

        if missing.is_empty() {
            Ok(BuiltinOutcome::Status(0))
        } else {
            Err(CommandError::ExecutionError(format!(
                "{}: not found",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::commands::tests::run;
    use crate::core::commands::{Builtin, BuiltinOutcome, CommandError};
    use crate::core::state::ShellState;

    #[test]
    fn test_alias_add_with_spaces() {
        let mut state = ShellState::for_tests();
        let (result, _) = run(Builtin::Alias, &mut state, &["ll=ls", "-l"]);
        assert!(matches!(result, Ok(BuiltinOutcome::Status(0))));
        assert_eq!(state.aliases.get("ll"), Some("ls -l"));
    }

    #[test]
    fn test_alias_quoted_and_multiple() {
        let mut state = ShellState::for_tests();
        run(Builtin::Alias, &mut state, &["ll='ls", "-la'", "gs=\"git", "status\""]);
        assert_eq!(state.aliases.get("ll"), Some("ls -la"));
        assert_eq!(state.aliases.get("gs"), Some("git status"));
    }

    #[test]
    fn test_alias_list_and_show() {
        let mut state = ShellState::for_tests();
        run(Builtin::Alias, &mut state, &["ll=ls -l"]);
        run(Builtin::Alias, &mut state, &["la=ls", "-a"]);

        let (_, out) = run(Builtin::Alias, &mut state, &[]);
        assert_eq!(out, "ll='ls -l'\nla='ls -a'\n");

        let (result, out) = run(Builtin::Alias, &mut state, &["la"]);
        assert!(result.is_ok());
        assert_eq!(out, "la='ls -a'\n");
    }

    #[test]
    fn test_alias_missing_name() {
        let mut state = ShellState::for_tests();
        run(Builtin::Alias, &mut state, &["ll=ls"]);

        let (result, out) = run(Builtin::Alias, &mut state, &["nope", "ll"]);
        assert!(matches!(result, Err(CommandError::ExecutionError(_))));
        assert_eq!(out, "ll='ls'\n");
    }

    #[test]
    fn test_alias_redefine_and_remove() {
        let mut state = ShellState::for_tests();
        run(Builtin::Alias, &mut state, &["ll=ls"]);
        run(Builtin::Alias, &mut state, &["ll=ls", "-l"]);
        assert_eq!(state.aliases.len(), 1);
        assert_eq!(state.aliases.get("ll"), Some("ls -l"));

        run(Builtin::Alias, &mut state, &["ll="]);
        assert!(state.aliases.is_empty());
    }

    #[test]
    fn test_alias_invalid_changes_nothing() {
        let mut state = ShellState::for_tests();
        let (result, _) = run(Builtin::Alias, &mut state, &["ok=ls", "=value"]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
        assert!(state.aliases.is_empty());
    }
}

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::core::aliases::AliasTable;
use crate::core::commands::Builtin;
use crate::core::env::EnvStore;
use crate::highlight::SyntaxHighlighter;
use crate::path::is_executable_file;

/// Line editor helper: completion of command names and paths, and highlighting.
#[derive(Clone)]
pub struct ShellCompleter {
    commands: BTreeSet<String>,
    aliases: BTreeSet<String>,
    scanned_path: Option<String>,
    highlighter: SyntaxHighlighter,
}

impl Default for ShellCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellCompleter {
    pub fn new() -> Self {
        ShellCompleter {
            commands: BTreeSet::new(),
            aliases: BTreeSet::new(),
            scanned_path: None,
            highlighter: SyntaxHighlighter::new(),
        }
    }

    /// Rescans `PATH` when it changed since the last call.
    pub fn refresh_commands(&mut self, env: &EnvStore) {
        let path = env.get("PATH").unwrap_or("");
        if self.scanned_path.as_deref() == Some(path) {
            return;
        }

        self.commands.clear();
        for dir in path.split(':').filter(|dir| !dir.is_empty()) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if is_executable_file(&entry.path()) {
                        self.commands.insert(name.to_string());
                    }
                }
            }
        }
        log::debug!("completion: {} commands on PATH", self.commands.len());
        self.scanned_path = Some(path.to_string());
    }

    pub fn update_aliases(&mut self, aliases: &AliasTable) {
        self.aliases = aliases.names().map(String::from).collect();
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        let mut matches: Vec<Pair> = Builtin::ALL
            .iter()
            .map(|builtin| builtin.name())
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: format!("{} (builtin)", name),
                replacement: format!("{} ", name),
            })
            .collect();

        matches.extend(
            self.aliases
                .iter()
                .filter(|alias| alias.starts_with(prefix))
                .map(|alias| Pair {
                    display: format!("{} (alias)", alias),
                    replacement: format!("{} ", alias),
                }),
        );

        matches.extend(
            self.commands
                .iter()
                .filter(|cmd| cmd.starts_with(prefix) && Builtin::from_name(cmd).is_none())
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                }),
        );

        matches
    }

    /// Completes the last path component of `incomplete` against the filesystem.
    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_part, file_prefix) = match incomplete.rfind('/') {
            Some(idx) => incomplete.split_at(idx + 1),
            None => ("", incomplete),
        };
        let dir_to_search = if dir_part.is_empty() {
            Path::new(".")
        } else {
            Path::new(dir_part)
        };

        let Ok(entries) = fs::read_dir(dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix)
                    || (name.starts_with('.') && !file_prefix.starts_with('.'))
                {
                    return None;
                }
                let (display, suffix) = if entry.path().is_dir() {
                    (format!("{}/", name), "/")
                } else {
                    (name.clone(), " ")
                };
                Some(Pair {
                    display,
                    replacement: format!("{}{}{}", dir_part, name, suffix),
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Byte offset where the word under the cursor starts, and whether that word
/// is in command position.
fn current_word(line: &str) -> (usize, bool) {
    let start = line
        .rfind(|c: char| c.is_whitespace() || matches!(c, ';' | '&' | '|'))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let before = line[..start].trim_end();
    let command_position = before.is_empty()
        || before.ends_with(';')
        || before.ends_with("&&")
        || before.ends_with("||");
    (start, command_position)
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let (start, command_position) = current_word(line_up_to_cursor);
        let word = &line_up_to_cursor[start..];

        let matches = if command_position && !word.contains('/') {
            self.complete_command(word)
        } else {
            self.complete_path(word)
        };
        Ok((start, matches))
    }
}

use std::io::BufRead;

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

mod completer;
pub mod history;

pub use completer::ShellCompleter;
pub use history::History;

use crate::error::ShellError;

/// Result of one blocking read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C at the prompt: the partial line is discarded.
    Interrupted,
    Eof,
}

/// Where input lines come from: the line editor on a terminal, or a script
/// file / pipe read verbatim.
pub enum LineReader {
    Interactive(Box<Editor<ShellCompleter, FileHistory>>),
    Script(Box<dyn BufRead>),
}

impl LineReader {
    /// Line editor seeded with the lines already in `history`.
    pub fn interactive(history: &History) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new()));
        editor.set_auto_add_history(false);

        for entry in history.entries() {
            editor.add_history_entry(entry.line.as_str())?;
        }

        Ok(LineReader::Interactive(Box::new(editor)))
    }

    pub fn script(reader: Box<dyn BufRead>) -> Self {
        LineReader::Script(reader)
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, LineReader::Interactive(_))
    }

    /// Blocks for the next line, without its line terminator. `prompt` is only
    /// shown by the line editor.
    pub fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self {
            LineReader::Interactive(editor) => match editor.readline(prompt) {
                Ok(line) => Ok(ReadOutcome::Line(line)),
                Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
                Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
                Err(e) => Err(e.into()),
            },
            LineReader::Script(reader) => {
                let mut buf = Vec::new();
                if reader.read_until(b'\n', &mut buf)? == 0 {
                    return Ok(ReadOutcome::Eof);
                }
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                Ok(ReadOutcome::Line(String::from_utf8_lossy(&buf).into_owned()))
            }
        }
    }

    /// Makes `line` reachable with the editor's history navigation.
    pub fn remember(&mut self, line: &str) {
        if let LineReader::Interactive(editor) = self {
            if let Err(e) = editor.add_history_entry(line) {
                log::warn!("Couldn't add to line editor history: {}", e);
            }
        }
    }

    pub fn completer_mut(&mut self) -> Option<&mut ShellCompleter> {
        match self {
            LineReader::Interactive(editor) => editor.helper_mut(),
            LineReader::Script(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_script_reader_strips_terminators() -> Result<(), ShellError> {
        let input = Cursor::new(b"echo one\r\n\nlast".to_vec());
        let mut reader = LineReader::script(Box::new(input));
        assert!(!reader.is_interactive());

        assert_eq!(reader.read_line("$ ")?, ReadOutcome::Line("echo one".into()));
        assert_eq!(reader.read_line("$ ")?, ReadOutcome::Line(String::new()));
        assert_eq!(reader.read_line("$ ")?, ReadOutcome::Line("last".into()));
        assert_eq!(reader.read_line("$ ")?, ReadOutcome::Eof);
        assert!(reader.completer_mut().is_none());
        Ok(())
    }
}

mod file_ops;

use std::{collections::VecDeque, fmt, path::PathBuf};

use self::file_ops::FileOps;

pub const DEFAULT_MAX_ENTRIES: usize = 4096;

#[derive(Debug)]
pub enum HistoryError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Io { path, source } => {
                write!(f, "history file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

/// One recorded input line. `index` is positional and reassigned whenever the
/// list changes, so it is not stable across sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub index: usize,
    pub line: String,
}

/// Capped FIFO log of input lines, optionally mirrored to a file.
pub struct History {
    entries: VecDeque<HistoryEntry>,
    file_ops: Option<FileOps>,
    max_entries: usize,
}

impl History {
    /// History that is never persisted.
    pub fn in_memory(max_entries: usize) -> Self {
        History {
            entries: VecDeque::new(),
            file_ops: None,
            max_entries,
        }
    }

    /// Loads `history_file` and keeps it updated. Persistence failures are not
    /// fatal: an unreadable file yields an empty history. A file holding more
    /// than `max_entries` lines is cut down to the newest ones.
    pub fn with_file(history_file: PathBuf, max_entries: usize) -> Self {
        let file_ops = FileOps::new(history_file);
        let (lines, truncated) = file_ops.load_entries(max_entries).unwrap_or_else(|e| {
            log::warn!("{}", e);
            (VecDeque::new(), false)
        });
        if truncated {
            if let Err(e) = file_ops.rewrite(lines.iter().map(String::as_str)) {
                log::warn!("{}", e);
            }
        }
        log::debug!(
            "loaded {} history entries from {}",
            lines.len(),
            file_ops.path().display()
        );

        let mut history = History {
            entries: lines
                .into_iter()
                .map(|line| HistoryEntry { index: 0, line })
                .collect(),
            file_ops: Some(file_ops),
            max_entries,
        };
        history.renumber();
        history
    }

    /// Records `line`; blank lines are ignored. The in-memory list is always
    /// updated even when writing the file fails.
    pub fn add(&mut self, line: &str) -> Result<(), HistoryError> {
        if line.trim().is_empty() || self.max_entries == 0 {
            return Ok(());
        }

        self.entries.push_back(HistoryEntry {
            index: 0,
            line: line.to_owned(),
        });
        let evicted = self.trim_entries();
        self.renumber();

        match &self.file_ops {
            Some(file_ops) if evicted => {
                file_ops.rewrite(self.entries.iter().map(|entry| entry.line.as_str()))
            }
            Some(file_ops) => file_ops.append_entry(line),
            None => Ok(()),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    fn trim_entries(&mut self) -> bool {
        let mut evicted = false;
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
            evicted = true;
        }
        evicted
    }

    fn renumber(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.index = index + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn lines(history: &History) -> Vec<&str> {
        history.entries().map(|entry| entry.line.as_str()).collect()
    }

    #[test]
    fn test_blank_lines_ignored() -> Result<(), HistoryError> {
        let mut history = History::in_memory(10);
        history.add("   ")?;
        history.add("")?;
        assert!(history.is_empty());
        Ok(())
    }

    #[test]
    fn test_capacity_evicts_oldest_first() -> Result<(), HistoryError> {
        let mut history = History::in_memory(3);
        for cmd in ["one", "two", "three", "four", "five"] {
            history.add(cmd)?;
            assert!(history.len() <= history.capacity());
        }

        assert_eq!(lines(&history), vec!["three", "four", "five"]);
        let indices: Vec<usize> = history.entries().map(|entry| entry.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_persists_and_reloads() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("history");

        let mut history = History::with_file(path.clone(), 10);
        history.add("echo one")?;
        history.add("echo two")?;

        let reloaded = History::with_file(path.clone(), 10);
        assert_eq!(lines(&reloaded), vec!["echo one", "echo two"]);
        assert_eq!(fs::read_to_string(&path)?, "echo one\necho two\n");
        Ok(())
    }

    #[test]
    fn test_load_applies_cap_and_rewrites_on_eviction() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("history");
        fs::write(&path, "a\n\nb\nc\n")?;

        let mut history = History::with_file(path.clone(), 2);
        assert_eq!(lines(&history), vec!["b", "c"]);
        assert_eq!(fs::read_to_string(&path)?, "b\nc\n");

        history.add("d")?;
        assert_eq!(lines(&history), vec!["c", "d"]);
        assert_eq!(fs::read_to_string(&path)?, "c\nd\n");
        Ok(())
    }

    #[test]
    fn test_file_within_cap_is_left_alone() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("history");
        fs::write(&path, "a\n\nb\n")?;

        let history = History::with_file(path.clone(), 5);
        assert_eq!(lines(&history), vec!["a", "b"]);
        assert_eq!(fs::read_to_string(&path)?, "a\n\nb\n");
        Ok(())
    }

    #[test]
    fn test_unwritable_file_keeps_memory() {
        let mut history = History::with_file(PathBuf::from("/nonexistent/dir/history"), 5);
        assert!(history.add("ls").is_err());
        assert_eq!(lines(&history), vec!["ls"]);
    }
}

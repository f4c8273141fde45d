use std::{
    collections::VecDeque,
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use super::HistoryError;

pub struct FileOps {
    file_path: PathBuf,
}

impl FileOps {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Reads the newest `max_entries` non-blank lines, and whether older lines
    /// were dropped to fit. A missing file is empty history.
    pub fn load_entries(
        &self,
        max_entries: usize,
    ) -> Result<(VecDeque<String>, bool), HistoryError> {
        if max_entries == 0 {
            return Ok((VecDeque::new(), false));
        }

        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok((VecDeque::new(), false)),
            Err(e) => return Err(self.error(e)),
        };

        let mut entries = VecDeque::new();
        let mut truncated = false;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| self.error(e))?;
            if line.trim().is_empty() {
                continue;
            }
            if entries.len() == max_entries {
                entries.pop_front();
                truncated = true;
            }
            entries.push_back(line);
        }

        Ok((entries, truncated))
    }

    pub fn append_entry(&self, entry: &str) -> Result<(), HistoryError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.file_path)
            .map_err(|e| self.error(e))?;

        writeln!(file, "{}", entry).map_err(|e| self.error(e))
    }

    pub fn rewrite<'a>(&self, entries: impl Iterator<Item = &'a str>) -> Result<(), HistoryError> {
        let file = File::create(&self.file_path).map_err(|e| self.error(e))?;
        let mut writer = BufWriter::new(file);

        for entry in entries {
            writeln!(writer, "{}", entry).map_err(|e| self.error(e))?;
        }
        writer.flush().map_err(|e| self.error(e))
    }

    fn error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.file_path.clone(),
            source,
        }
    }
}

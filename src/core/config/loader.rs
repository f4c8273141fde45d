use std::{fs, io::ErrorKind, path::Path};

use super::ConfigError;

/// Reads startup command lines from an rc file.
pub struct RcLoader<'a> {
    path: &'a Path,
}

impl<'a> RcLoader<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Command lines in file order, without blanks and comment lines.
    /// A missing file yields `Ok(None)`.
    pub fn load_lines(&self) -> Result<Option<Vec<String>>, ConfigError> {
        let content = match fs::read_to_string(self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::IoError(self.path.to_path_buf(), e)),
        };

        Ok(Some(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from)
                .collect(),
        ))
    }
}

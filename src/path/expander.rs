use std::path::{Path, PathBuf};

/// Tilde expansion against a known home directory.
#[derive(Clone, Debug)]
pub struct PathExpander<'a> {
    home: &'a Path,
}

impl<'a> PathExpander<'a> {
    pub fn new(home: &'a Path) -> Self {
        Self { home }
    }

    pub fn expand(&self, path: &str) -> PathBuf {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            PathBuf::from(path)
        }
    }

    fn expand_tilde(&self, path: &str) -> PathBuf {
        let without_tilde = &path[1..];
        if without_tilde.is_empty() {
            return self.home.to_path_buf();
        }

        match without_tilde.strip_prefix('/') {
            Some(stripped) => stripped
                .split('/')
                .filter(|part| !part.is_empty())
                .fold(self.home.to_path_buf(), |mut home, part| {
                    home.push(part);
                    home
                }),
            // "~user" forms are left alone
            None => PathBuf::from(path),
        }
    }
}

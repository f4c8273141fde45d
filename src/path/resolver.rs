use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::core::commands::Builtin;
use crate::core::env::EnvStore;
use crate::process::ProcessError;

/// How a command head will be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Builtin(Builtin),
    External(PathBuf),
}

/// Builtins first, then literal paths, then a `PATH` search in listed order.
pub fn resolve(name: &str, env: &EnvStore) -> Result<Resolution, ProcessError> {
    if let Some(builtin) = Builtin::from_name(name) {
        return Ok(Resolution::Builtin(builtin));
    }

    if name.contains('/') {
        return resolve_literal(name).map(Resolution::External);
    }

    let search_path = env
        .get("PATH")
        .filter(|path| !path.is_empty())
        .ok_or_else(|| ProcessError::CommandNotFound(name.to_string()))?;

    search_path
        .split(':')
        .map(|dir| {
            // An empty entry means the current directory.
            if dir.is_empty() {
                Path::new(".").join(name)
            } else {
                Path::new(dir).join(name)
            }
        })
        .find(|candidate| is_executable_file(candidate))
        .map(|found| {
            log::debug!("resolved {} to {}", name, found.display());
            Resolution::External(found)
        })
        .ok_or_else(|| ProcessError::CommandNotFound(name.to_string()))
}

fn resolve_literal(name: &str) -> Result<PathBuf, ProcessError> {
    let path = PathBuf::from(name);
    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() && has_exec_access(&path) => Ok(path),
        Ok(_) => Err(ProcessError::PermissionDenied(name.to_string())),
        Err(_) => Err(ProcessError::CommandNotFound(name.to_string())),
    }
}

/// A regular file (after following links) the current user may execute.
pub fn is_executable_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file()) && has_exec_access(path)
}

fn has_exec_access(path: &Path) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn make_file(dir: &Path, name: &str, mode: u32) -> std::io::Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))?;
        Ok(path)
    }

    fn env_with_path(path: &str) -> EnvStore {
        [("PATH", path)].into_iter().collect()
    }

    #[test]
    fn test_builtin_wins_over_path() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        make_file(dir.path(), "cd", 0o755)?;
        let env = env_with_path(&dir.path().to_string_lossy());

        assert!(matches!(
            resolve("cd", &env),
            Ok(Resolution::Builtin(Builtin::Cd))
        ));
        Ok(())
    }

    #[test]
    fn test_first_match_in_path_order() -> Result<(), Box<dyn std::error::Error>> {
        let first = tempfile::tempdir()?;
        let second = tempfile::tempdir()?;
        make_file(first.path(), "tool", 0o644)?;
        let expected = make_file(second.path(), "tool", 0o755)?;
        make_file(first.path(), "other", 0o755)?;
        let other = make_file(second.path(), "other", 0o755)?;

        let env = env_with_path(&format!(
            "{}:{}",
            first.path().display(),
            second.path().display()
        ));

        // a non-executable entry earlier in PATH is skipped
        assert_eq!(resolve("tool", &env)?, Resolution::External(expected));
        assert_ne!(resolve("other", &env)?, Resolution::External(other));
        Ok(())
    }

    #[test]
    fn test_unset_or_empty_path_is_not_found() {
        let empty = env_with_path("");
        let unset = EnvStore::new();

        assert!(matches!(
            resolve("sh", &empty),
            Err(ProcessError::CommandNotFound(_))
        ));
        assert!(matches!(
            resolve("sh", &unset),
            Err(ProcessError::CommandNotFound(_))
        ));
    }

    #[test]
    fn test_literal_paths() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let runnable = make_file(dir.path(), "run", 0o755)?;
        let plain = make_file(dir.path(), "plain", 0o644)?;
        let env = EnvStore::new();

        let runnable_name = runnable.to_string_lossy().into_owned();
        assert_eq!(resolve(&runnable_name, &env)?, Resolution::External(runnable));

        let plain_name = plain.to_string_lossy().into_owned();
        assert!(matches!(
            resolve(&plain_name, &env),
            Err(ProcessError::PermissionDenied(_))
        ));

        let dir_name = dir.path().to_string_lossy().into_owned();
        assert!(matches!(
            resolve(&dir_name, &env),
            Err(ProcessError::PermissionDenied(_))
        ));

        let missing = dir.path().join("missing").to_string_lossy().into_owned();
        assert!(matches!(
            resolve(&missing, &env),
            Err(ProcessError::CommandNotFound(_))
        ));
        Ok(())
    }
}

use super::EnvError;
use std::env;

/// Ordered name/value store seeded from the process environment.
///
/// Lookups are a linear scan; listing follows insertion order. Children get a
/// snapshot through [`EnvStore::iter`], the process environment itself is never
/// mutated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvStore {
    vars: Vec<(Box<str>, Box<str>)>,
}

impl EnvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every unicode-clean variable of the running process.
    pub fn from_process() -> Self {
        env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if !Self::is_valid_name(name) {
            return Err(EnvError::InvalidName(name.to_string()));
        }

        match self.position(name) {
            Some(slot) => self.vars[slot].1 = value.into(),
            None => self.vars.push((name.into(), value.into())),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|slot| &*self.vars[slot].1)
    }

    pub fn require(&self, name: &str) -> Result<&str, EnvError> {
        self.get(name)
            .ok_or_else(|| EnvError::VarNotFound(name.to_string()))
    }

    /// Removes `name`, returning whether it was present.
    pub fn unset(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(slot) => {
                self.vars.remove(slot);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (&**k, &**v))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|(key, _)| &**key == name)
    }

    fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && !name.contains('=') && !name.contains('\0')
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for EnvStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = EnvStore::new();
        for (key, value) in iter {
            if let Err(e) = store.set(key.as_ref(), value.as_ref()) {
                log::debug!("skipping environment entry: {}", e);
            }
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_store() -> EnvStore {
        [("HOME", "/home/test"), ("PATH", "/usr/bin")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_set_and_get() -> Result<(), EnvError> {
        let mut store = setup_store();
        store.set("TEST_VAR", "test value")?;
        assert_eq!(store.get("TEST_VAR"), Some("test value"));
        Ok(())
    }

    #[test]
    fn test_set_replaces_in_place() -> Result<(), EnvError> {
        let mut store = setup_store();
        store.set("HOME", "/root")?;

        let names: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["HOME", "PATH"]);
        assert_eq!(store.get("HOME"), Some("/root"));
        assert_eq!(store.len(), 2);
        Ok(())
    }

    #[test]
    fn test_unset() {
        let mut store = setup_store();
        assert!(store.unset("HOME"));
        assert!(!store.unset("HOME"));
        assert_eq!(store.get("HOME"), None);
        assert!(matches!(store.require("HOME"), Err(EnvError::VarNotFound(_))));
    }

    #[test]
    fn test_invalid_var_name() {
        let mut store = setup_store();
        assert!(store.set("", "value").is_err());
        assert!(store.set("A=B", "value").is_err());
    }

    #[test]
    fn test_collect_skips_invalid_names() {
        let store: EnvStore = [("", "empty"), ("A=B", "x"), ("OK", "1")]
            .into_iter()
            .collect();

        let names: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["OK"]);
    }

    #[test]
    fn test_from_process_has_path() {
        let store = EnvStore::from_process();
        assert_eq!(store.get("PATH").map(String::from), env::var("PATH").ok());
    }
}

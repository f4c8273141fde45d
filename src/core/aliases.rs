/// Alias name to definition, in definition order.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: Vec<(Box<str>, Box<str>)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `name`, replacing an earlier definition in place.
    pub fn add(&mut self, name: &str, definition: &str) {
        match self.position(name) {
            Some(slot) => self.aliases[slot].1 = definition.into(),
            None => self.aliases.push((name.into(), definition.into())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|slot| &*self.aliases[slot].1)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(slot) => {
                self.aliases.remove(slot);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (&**k, &**v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(|(k, _)| &**k)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.aliases.iter().position(|(key, _)| &**key == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_alias() {
        let mut table = AliasTable::new();
        table.add("ll", "ls -la");
        assert_eq!(table.get("ll"), Some("ls -la"));
        assert_eq!(table.get("la"), None);
    }

    #[test]
    fn test_redefinition_keeps_single_entry() {
        let mut table = AliasTable::new();
        table.add("ll", "ls -la");
        table.add("gs", "git status");
        table.add("ll", "ls -l");

        assert_eq!(table.len(), 2);
        let all: Vec<(&str, &str)> = table.iter().collect();
        assert_eq!(all, vec![("ll", "ls -l"), ("gs", "git status")]);
    }

    #[test]
    fn test_remove() {
        let mut table = AliasTable::new();
        table.add("ll", "ls -la");
        assert!(table.remove("ll"));
        assert!(!table.remove("ll"));
        assert!(table.is_empty());
    }
}

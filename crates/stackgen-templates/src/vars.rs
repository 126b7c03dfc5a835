//! Variable table: placeholder name to substitution text

use std::collections::BTreeMap;

/// Builder for a [`VarTable`].
///
/// Consumed by [`build`](VarTableBuilder::build); the resulting table
/// cannot be mutated, so every render call in a run sees the same
/// variables.
#[derive(Debug, Default)]
pub struct VarTableBuilder {
    entries: BTreeMap<String, String>,
}

impl VarTableBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value for the same name
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Set every `(name, value)` pair from an iterator
    pub fn set_all<'a, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in pairs {
            self.entries.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Freeze the builder into an immutable table
    pub fn build(self) -> VarTable {
        VarTable {
            entries: self.entries,
        }
    }
}

/// Immutable mapping from placeholder name to substitution text.
///
/// Built exactly once per generation run, before any file operation.
/// Keys are iterated in name order so substitution is deterministic.
#[derive(Debug, Clone)]
pub struct VarTable {
    entries: BTreeMap<String, String>,
}

impl VarTable {
    /// Start building a table
    pub fn builder() -> VarTableBuilder {
        VarTableBuilder::new()
    }

    /// Look up a variable by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterate `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of variables in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The placeholder token a template must contain for `name`
    pub fn token(name: &str) -> String {
        format!("{{{{:{}:}}}}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_form() {
        assert_eq!(VarTable::token("project_name"), "{{:project_name:}}");
    }

    #[test]
    fn test_builder_set_and_get() {
        let vars = VarTable::builder()
            .set("a", "1")
            .set("b", "2")
            .set("a", "3")
            .build();
        assert_eq!(vars.get("a"), Some("3"));
        assert_eq!(vars.get("b"), Some("2"));
        assert_eq!(vars.get("c"), None);
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_set_all_merges_pairs() {
        let vars = VarTable::builder()
            .set("base", "kept")
            .set_all([("x", "1"), ("y", "2")])
            .build();
        assert_eq!(vars.get("base"), Some("kept"));
        assert_eq!(vars.get("x"), Some("1"));
        assert_eq!(vars.get("y"), Some("2"));
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let vars = VarTable::builder()
            .set("zeta", "z")
            .set("alpha", "a")
            .build();
        let names: Vec<&str> = vars.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}

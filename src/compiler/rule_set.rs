//! Ordered rule storage.
//!
//! A `RuleSet` maps reference names to raw fragments. Insertion order is
//! significant: it is the precedence order of alternatives in the compiled
//! pattern (first defined, first tried).
//!
//! Each entry also carries an optional *resolved* body, filled in by the
//! resolver the first time the name is expanded. Later compilations reuse it.
//!
//! ## Cache invalidation
//!
//! - Adding a new name keeps every cached body: a successful resolution can
//!   only have touched names that already existed.
//! - Redefining an existing name drops the whole cache, because any cached body
//!   may have inlined the old fragment.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    fragment: String,
    resolved: Option<String>,
}

/// Ordered mapping from reference name to raw pattern fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or redefine `name`.
    ///
    /// A redefinition keeps the original position of `name`.
    pub fn insert(&mut self, name: impl Into<String>, fragment: impl Into<String>) {
        let name = name.into();
        let fragment = fragment.into();

        match self.index.get(&name) {
            Some(&idx) => {
                self.entries[idx].fragment = fragment;
                self.clear_cache();
            }
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(Entry { name, fragment, resolved: None });
            }
        }
    }

    /// Raw fragment for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|e| e.fragment.as_str())
    }

    /// Cached resolved body for `name`, if it has been expanded before.
    pub fn resolved(&self, name: &str) -> Option<&str> {
        self.entry(name).and_then(|e| e.resolved.as_deref())
    }

    pub(crate) fn cache(&mut self, name: &str, resolved: &str) {
        if let Some(&idx) = self.index.get(name) {
            self.entries[idx].resolved = Some(resolved.to_string());
        }
    }

    /// Forget every cached resolved body.
    pub fn clear_cache(&mut self) {
        for entry in &mut self.entries {
            entry.resolved = None;
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, raw fragment)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|e| (e.name.as_str(), e.fragment.as_str()))
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rules = RuleSet::new();
        for (name, fragment) in iter {
            rules.insert(name, fragment);
        }
        rules
    }
}

// Serialized as an ordered `name -> raw fragment` map; the cache is not part of it.
impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, fragment) in self.iter() {
            map.serialize_entry(name, fragment)?;
        }
        map.end()
    }
}

use indexmap::IndexMap;

use crate::config::DependencyScope;

/// Identity of a selected choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    /// The bare key, shared by every namespace carrying it
    Key(String),
    /// Namespace and key
    Qualified(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    namespace: String,
}

/// The live set of selected choices, each mapped to the namespace it was
/// selected in.
///
/// With [`DependencyScope::Global`] keys are the addressing unit: a key
/// selected in one namespace counts as selected wherever else the same key
/// appears. With [`DependencyScope::Namespace`] a choice is addressed by its
/// namespace and key, so equal keys in different namespaces are independent.
/// Insertion order is kept and becomes the order of the final result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    scope: DependencyScope,
    entries: IndexMap<Slot, Entry>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scope(scope: DependencyScope) -> Self {
        Self {
            scope,
            entries: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> DependencyScope {
        self.scope
    }

    fn slot(&self, key: &str, namespace: &str) -> Slot {
        match self.scope {
            DependencyScope::Global => Slot::Key(key.to_string()),
            DependencyScope::Namespace => Slot::Qualified(namespace.to_string(), key.to_string()),
        }
    }

    /// Whether `key` counts as selected when looked up from `namespace`.
    #[must_use]
    pub fn contains(&self, key: &str, namespace: &str) -> bool {
        self.entries.contains_key(&self.slot(key, namespace))
    }

    /// Adds `key`; re-adding an existing entry keeps its position.
    pub fn insert(&mut self, key: &str, namespace: &str) {
        let entry = Entry {
            key: key.to_string(),
            namespace: namespace.to_string(),
        };
        self.entries.insert(self.slot(key, namespace), entry);
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str, namespace: &str) -> bool {
        let slot = self.slot(key, namespace);
        self.entries.shift_remove(&slot).is_some()
    }

    /// Number of selected keys recorded under `namespace`.
    #[must_use]
    pub fn count_in(&self, namespace: &str) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.namespace == namespace)
            .count()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

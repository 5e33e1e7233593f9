//! This module contains the symbol table the parser resolves identifiers against.
//!
//! The parser only needs a stable handle per name; what later passes store for a symbol is up
//! to them.

use std::{collections::HashMap, fmt::Display};

/// A stable handle to an entry of a symbol table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(usize);

impl SymbolId {
    /// Get the index of the symbol in the table that created it.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resolves identifier names to symbol handles.
pub trait SymbolResolver {
    /// Returns the handle for `name`, creating an entry if the name is new.
    ///
    /// Resolving the same name twice must return the same handle.
    fn resolve(&mut self, name: &str) -> SymbolId;
}

impl<T: SymbolResolver + ?Sized> SymbolResolver for &mut T {
    fn resolve(&mut self, name: &str) -> SymbolId {
        (**self).resolve(name)
    }
}

/// Interns identifier names in the order they are first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, SymbolId>,
}

impl SymbolTable {
    /// Creates an empty [`SymbolTable`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle of `name` if it has been resolved before.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.ids.get(name).copied()
    }

    /// Whether `name` has been resolved before.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Get the name a handle was created for.
    #[must_use]
    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    /// Get the number of distinct names in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the entries in the order they were created.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (SymbolId(index), name.as_str()))
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&mut self, name: &str) -> SymbolId {
        if let Some(id) = self.get(name) {
            return id;
        }

        let id = SymbolId(self.names.len());
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);

        tracing::trace!(name, %id, "New symbol");

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_stable() {
        let mut table = SymbolTable::new();

        let x = table.resolve("x");
        let y = table.resolve("y");

        assert_ne!(x, y);
        assert_eq!(table.resolve("x"), x);
        assert_eq!(table.len(), 2);
        assert_eq!(table.name(y), Some("y"));
        assert_eq!(table.get("z"), None);
        assert!(table.contains("x"));
    }

    #[test]
    fn test_iter_in_creation_order() {
        let mut table = SymbolTable::new();
        for name in ["b", "a", "b", "c"] {
            table.resolve(name);
        }

        assert_eq!(
            table.iter().map(|(_, name)| name).collect::<Vec<_>>(),
            vec!["b", "a", "c"]
        );
    }
}

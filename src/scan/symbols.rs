//! Symbol table filled by `@name = value` definitions.

use std::collections::HashMap;

/// Name → value map shared by every request of one batch.
///
/// Entries are only ever inserted or overwritten; the last definition of a
/// name wins.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, String>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `name`, replacing any earlier value.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.symbols.insert(name.into(), value.into());
    }

    /// Looks `name` up by exact match.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }

    /// Number of defined names.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether nothing has been defined yet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

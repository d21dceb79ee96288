//! In-memory symbol index: symbol name to the modules that bind it

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A symbol made importable by a module, either defined there or re-exported
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolBinding {
    /// Symbol name
    pub symbol: String,
    /// Dotted module the symbol can be imported from
    pub module: String,
}

impl SymbolBinding {
    pub fn new(symbol: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            module: module.into(),
        }
    }
}

/// Mapping from symbol name to candidate modules, in insertion order
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    by_name: HashMap<String, Vec<String>>,
    /// Total number of recorded bindings
    binding_count: usize,
}

impl SymbolIndex {
    /// Create a new empty symbol index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from bindings, keeping their order
    pub fn from_bindings(bindings: impl IntoIterator<Item = SymbolBinding>) -> Self {
        let mut index = Self::new();
        index.extend(bindings);
        index
    }

    /// Append a binding's module to its symbol's candidate list
    pub fn insert(&mut self, binding: SymbolBinding) {
        self.by_name
            .entry(binding.symbol)
            .or_default()
            .push(binding.module);
        self.binding_count += 1;
    }

    /// Candidate modules for a symbol, in the order they were indexed
    pub fn modules(&self, symbol: &str) -> Option<&[String]> {
        self.by_name.get(symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_name.contains_key(symbol)
    }

    /// Number of distinct symbols
    pub fn symbol_count(&self) -> usize {
        self.by_name.len()
    }

    /// Total number of bindings, counting repeats
    pub fn binding_count(&self) -> usize {
        self.binding_count
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All entries ordered by symbol name
    pub fn sorted(&self) -> BTreeMap<&str, &[String]> {
        self.by_name
            .iter()
            .map(|(symbol, modules)| (symbol.as_str(), modules.as_slice()))
            .collect()
    }
}

impl Extend<SymbolBinding> for SymbolIndex {
    fn extend<T: IntoIterator<Item = SymbolBinding>>(&mut self, iter: T) {
        for binding in iter {
            self.insert(binding);
        }
    }
}

impl PartialEq for SymbolIndex {
    fn eq(&self, other: &Self) -> bool {
        self.by_name == other.by_name
    }
}

impl Eq for SymbolIndex {}

impl Serialize for SymbolIndex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sorted().serialize(serializer)
    }
}

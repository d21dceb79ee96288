//! Import suggestion: pick the best candidate module for a symbol

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

use super::index::SymbolIndex;
use crate::config::IndexerConfig;
use crate::indexer::ProjectIndexer;

/// A suggested import for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub symbol: String,
    pub module: String,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from {} import {}", self.module, self.symbol)
    }
}

/// The shortest candidate module, counted in characters.
///
/// Ties go to the earliest candidate.
pub fn best_candidate(modules: &[String]) -> Option<&str> {
    modules
        .iter()
        .min_by_key(|module| module.chars().count())
        .map(String::as_str)
}

/// Suggest an import for `symbol` from an already built index
pub fn suggest_from_index(index: &SymbolIndex, symbol: &str) -> Option<Suggestion> {
    let modules = index.modules(symbol)?;
    let module = best_candidate(modules)?;

    debug!(
        "Picked '{}' for '{}' out of {} candidates",
        module,
        symbol,
        modules.len()
    );

    Some(Suggestion {
        symbol: symbol.to_string(),
        module: module.to_string(),
    })
}

/// Indexes a project on every query and suggests imports from it
pub struct ImportSuggester {
    indexer: ProjectIndexer,
}

impl ImportSuggester {
    pub fn new(config: IndexerConfig) -> Self {
        Self {
            indexer: ProjectIndexer::new(config),
        }
    }

    /// Index `root` from scratch and suggest an import for `symbol`.
    ///
    /// `Ok(None)` means no module binds the symbol or the root is not a
    /// directory.
    pub fn suggest(&self, root: &Path, symbol: &str) -> Result<Option<Suggestion>> {
        let report = self.indexer.index(root)?;
        Ok(suggest_from_index(&report.index, symbol))
    }
}

impl Default for ImportSuggester {
    fn default() -> Self {
        Self::new(IndexerConfig::default())
    }
}

/// Suggest an import line such as `from pkg.mod import name`, using the
/// default configuration.
pub fn search_project_imports(root: &Path, symbol: &str) -> Result<Option<String>> {
    let suggestion = ImportSuggester::default().suggest(root, symbol)?;
    Ok(suggestion.map(|s| s.to_string()))
}

//! Symbol indexing and import suggestion
//!
//! The index maps every top-level Python symbol of a project to the modules
//! it can be imported from; the suggester turns a lookup into an import line.

pub mod index;
pub mod suggest;

pub use index::{SymbolBinding, SymbolIndex};
pub use suggest::{
    best_candidate, search_project_imports, suggest_from_index, ImportSuggester, Suggestion,
};

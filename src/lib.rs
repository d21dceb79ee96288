pub mod cli;
pub mod commands;
pub mod config;
pub mod indexer;
pub mod logging;
pub mod symbol;

pub use config::Config;
pub use indexer::{IndexReport, ProjectIndexer};
pub use symbol::{search_project_imports, ImportSuggester, Suggestion, SymbolIndex};

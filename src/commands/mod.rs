//! Command implementations for the `autoimport` binary.
//!
//! Each command returns whether it found anything, which `main` maps to the
//! process exit status.

pub mod candidates;
pub mod suggest;
pub mod symbols;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::indexer::{IndexReport, ProjectIndexer};

/// Everything a command needs to index the project
pub struct CommandContext {
    pub root: PathBuf,
    pub config: Config,
    /// Print the diagnostics summary after indexing
    pub report: bool,
}

impl CommandContext {
    /// Index the project root from scratch
    pub fn index(&self) -> Result<IndexReport> {
        let indexer = ProjectIndexer::new(self.config.indexer.clone());
        let report = indexer
            .index(&self.root)
            .with_context(|| format!("Failed to index {}", self.root.display()))?;

        if self.report {
            eprintln!("{}", report.summary());
            report.diagnostics.print_summary();
        }

        Ok(report)
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autoimport")]
#[command(author, version, about = "Suggest Python import statements for unqualified names")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root to scan (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Abort when a file fails to parse instead of skipping it
    #[arg(long, global = true)]
    pub strict: bool,

    /// Parse files in parallel
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Print indexing diagnostics to stderr
    #[arg(long, global = true)]
    pub report: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest an import line for a symbol
    Suggest {
        /// Symbol name to resolve
        symbol: String,
    },

    /// List every module that binds a symbol
    Candidates {
        /// Symbol name to resolve
        symbol: String,
    },

    /// Dump the whole symbol index
    Symbols {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use autoimport::cli::{Cli, Commands};
use autoimport::commands::CommandContext;
use autoimport::config::{Config, ParseErrorPolicy};
use autoimport::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Project root defaults to the current directory
    let project_root = match cli.root.clone() {
        Some(root) => root,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    // Load configuration (if available, otherwise use defaults)
    let mut config = Config::load(&project_root).unwrap_or_else(|e| {
        eprintln!("Warning: {:#}, using defaults", e);
        Config::default()
    });
    if cli.strict {
        config.indexer.on_parse_error = ParseErrorPolicy::Abort;
    }
    if cli.parallel {
        config.indexer.parallel = true;
    }
    if cli.verbose {
        config.logging.stderr = true;
        config.logging.stderr_level = "debug".to_string();
    }

    // The guard MUST be held until program exit to ensure logs are flushed
    let logging_guard = init_logging(&config.logging, &project_root)?;

    tracing::debug!("Project root: {}", project_root.display());

    let ctx = CommandContext {
        root: project_root,
        config,
        report: cli.report,
    };

    let found = match cli.command {
        Commands::Suggest { symbol } => autoimport::commands::suggest::run(&ctx, &symbol)?,
        Commands::Candidates { symbol } => autoimport::commands::candidates::run(&ctx, &symbol)?,
        Commands::Symbols { json } => autoimport::commands::symbols::run(&ctx, json)?,
    };

    if !found {
        drop(logging_guard);
        std::process::exit(1);
    }

    Ok(())
}

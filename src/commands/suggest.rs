use anyhow::Result;

use super::CommandContext;
use crate::symbol::suggest_from_index;

/// Run the suggest command
///
/// Prints `from <module> import <symbol>` on stdout, or a note on stderr when
/// no module binds the symbol.
pub fn run(ctx: &CommandContext, symbol: &str) -> Result<bool> {
    let report = ctx.index()?;

    match suggest_from_index(&report.index, symbol) {
        Some(suggestion) => {
            println!("{}", suggestion);
            Ok(true)
        }
        None => {
            eprintln!("No import found for: {}", symbol);
            Ok(false)
        }
    }
}

use anyhow::{Context, Result};

use super::CommandContext;
use crate::symbol::SymbolIndex;

/// Run the symbols command
///
/// Dumps the index sorted by symbol name, as `symbol: mod1, mod2` lines or
/// as a JSON object.
pub fn run(ctx: &CommandContext, json: bool) -> Result<bool> {
    let report = ctx.index()?;

    if json {
        let output = serde_json::to_string_pretty(&report.index)
            .context("Failed to serialize symbol index")?;
        println!("{}", output);
    } else {
        print!("{}", format_index(&report.index));
    }

    Ok(!report.index.is_empty())
}

/// Render the index as one `symbol: modules` line per symbol
pub fn format_index(index: &SymbolIndex) -> String {
    index
        .sorted()
        .into_iter()
        .map(|(symbol, modules)| format!("{}: {}\n", symbol, modules.join(", ")))
        .collect()
}

use anyhow::Result;

use super::CommandContext;

/// Run the candidates command
///
/// Prints every module binding `symbol`, one per line, in index order.
pub fn run(ctx: &CommandContext, symbol: &str) -> Result<bool> {
    let report = ctx.index()?;

    let Some(modules) = report.index.modules(symbol) else {
        eprintln!("No module binds: {}", symbol);
        return Ok(false);
    };

    for module in modules {
        println!("{}", module);
    }

    Ok(true)
}

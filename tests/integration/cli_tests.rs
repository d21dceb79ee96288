use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::helpers::test_harness::TestHarness;

fn autoimport(root: &Path, args: &[&str]) -> Result<Output> {
    let cli_path = PathBuf::from(env!("CARGO_BIN_EXE_autoimport"));
    let output = Command::new(cli_path)
        .args(args)
        .arg("--root")
        .arg(root)
        .env_remove("RUST_LOG")
        .output()?;
    Ok(output)
}

fn sample_project() -> Result<TestHarness> {
    let harness = TestHarness::new()?;
    harness.create_test_file("pkg/widgets.py", "class Widget:\n    pass\n")?;
    harness.create_test_file("app.py", "from pkg.widgets import Widget\n\nDEBUG = False\n")?;
    Ok(harness)
}

#[test]
fn test_suggest_prints_import_line() -> Result<()> {
    let harness = sample_project()?;

    let output = autoimport(harness.path(), &["suggest", "Widget"])?;

    assert!(output.status.success(), "suggest failed: {:?}", output);
    assert_eq!(String::from_utf8(output.stdout)?, "from pkg.widgets import Widget\n");

    Ok(())
}

#[test]
fn test_suggest_unknown_symbol_exits_with_one() -> Result<()> {
    let harness = sample_project()?;

    let output = autoimport(harness.path(), &["suggest", "Missing"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("No import found for: Missing"));

    Ok(())
}

#[test]
fn test_candidates_lists_modules_in_index_order() -> Result<()> {
    let harness = sample_project()?;

    let output = autoimport(harness.path(), &["candidates", "Widget"])?;

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "pkg.widgets\npkg.widgets\n");

    Ok(())
}

#[test]
fn test_symbols_json_dump() -> Result<()> {
    let harness = sample_project()?;

    let output = autoimport(harness.path(), &["symbols", "--json"])?;

    assert!(output.status.success());
    let dump: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        dump,
        serde_json::json!({
            "DEBUG": ["app"],
            "Widget": ["pkg.widgets", "pkg.widgets"],
        })
    );

    Ok(())
}

#[test]
fn test_symbols_on_empty_project_exits_with_one() -> Result<()> {
    let harness = TestHarness::new()?;

    let output = autoimport(harness.path(), &["symbols"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_strict_fails_on_syntax_error() -> Result<()> {
    let harness = sample_project()?;
    harness.create_test_file("broken.py", "def broken(:\n    pass\n")?;

    let lenient = autoimport(harness.path(), &["suggest", "Widget"])?;
    assert!(lenient.status.success());

    let strict = autoimport(harness.path(), &["suggest", "Widget", "--strict"])?;
    assert!(!strict.status.success());
    assert!(String::from_utf8(strict.stderr)?.contains("Syntax error in"));

    Ok(())
}

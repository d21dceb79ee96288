use anyhow::Result;
use autoimport::config::IndexerConfig;
use autoimport::{search_project_imports, ImportSuggester};

use crate::helpers::test_harness::TestHarness;

#[test]
fn test_shortest_module_wins() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("pkg/a.py", "class Widget:\n    pass\n")?;
    harness.create_test_file("x.py", "class Widget:\n    pass\n")?;

    let suggestion = search_project_imports(harness.path(), "Widget")?;
    assert_eq!(suggestion.as_deref(), Some("from x import Widget"));

    Ok(())
}

#[test]
fn test_tie_break_follows_sorted_paths() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("bb.py", "def helper():\n    pass\n")?;
    harness.create_test_file("aa.py", "def helper():\n    pass\n")?;

    let suggestion = search_project_imports(harness.path(), "helper")?;
    assert_eq!(suggestion.as_deref(), Some("from aa import helper"));

    Ok(())
}

#[test]
fn test_reexport_points_at_source_module() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(
        "project/package/__init__.py",
        "from project.package.internal.models import Model\n",
    )?;
    harness.create_test_file(
        "project/package/internal/models.py",
        "class Model:\n    pass\n",
    )?;

    let suggester = ImportSuggester::default();
    let suggestion = suggester.suggest(harness.path(), "Model")?.unwrap();

    // Both bindings carry the defining module, never the __init__ path
    assert_eq!(suggestion.module, "project.package.internal.models");

    Ok(())
}

#[test]
fn test_reexport_from_short_module_is_preferred() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("api.py", "from core import Client\n")?;
    harness.create_test_file("vendor/deep/client.py", "class Client:\n    pass\n")?;

    let suggestion = search_project_imports(harness.path(), "Client")?;
    assert_eq!(suggestion.as_deref(), Some("from core import Client"));

    Ok(())
}

#[test]
fn test_absent_symbol_is_none() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("m.py", "present = 1\n")?;

    assert_eq!(search_project_imports(harness.path(), "absent")?, None);

    Ok(())
}

#[test]
fn test_missing_root_is_none() -> Result<()> {
    let harness = TestHarness::new()?;
    let missing = harness.path().join("nowhere");

    assert_eq!(search_project_imports(&missing, "anything")?, None);

    Ok(())
}

#[test]
fn test_plain_import_is_not_a_candidate() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("m.py", "import os\nimport json as json\n")?;

    assert_eq!(search_project_imports(harness.path(), "os")?, None);
    assert_eq!(search_project_imports(harness.path(), "json")?, None);

    Ok(())
}

#[test]
fn test_nested_names_are_not_candidates() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(
        "m.py",
        "def outer():\n    inner = 1\n\nclass Box:\n    size = 3\n",
    )?;

    assert_eq!(search_project_imports(harness.path(), "inner")?, None);
    assert_eq!(search_project_imports(harness.path(), "size")?, None);
    assert!(search_project_imports(harness.path(), "outer")?.is_some());

    Ok(())
}

#[test]
fn test_repeated_queries_are_identical() -> Result<()> {
    let harness = TestHarness::new()?;
    for (path, content) in [
        ("one/util.py", "def shared():\n    pass\n"),
        ("two/util.py", "def shared():\n    pass\n"),
        ("tre/util.py", "shared = None\n"),
    ] {
        harness.create_test_file(path, content)?;
    }

    let first = search_project_imports(harness.path(), "shared")?;
    let second = search_project_imports(harness.path(), "shared")?;

    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("from one.util import shared"));

    Ok(())
}

#[test]
fn test_strict_mode_propagates_syntax_errors() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("broken.py", "class (:\n")?;
    harness.create_test_file("ok.py", "value = 1\n")?;

    let lenient = ImportSuggester::default();
    assert!(lenient.suggest(harness.path(), "value")?.is_some());

    let strict = ImportSuggester::new(IndexerConfig {
        on_parse_error: autoimport::config::ParseErrorPolicy::Abort,
        ..Default::default()
    });
    assert!(strict.suggest(harness.path(), "value").is_err());

    Ok(())
}

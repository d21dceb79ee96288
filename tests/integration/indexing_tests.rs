use anyhow::Result;
use autoimport::indexer::DiagnosticCategory;

use crate::helpers::test_harness::TestHarness;

#[test]
fn test_index_realistic_package() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(
        "shop/models.py",
        r#"
from __future__ import annotations

import dataclasses
from decimal import Decimal as D

CURRENCY: str = "EUR"
DEFAULT_TAX = RATE = 0.2
_registry, _count = {}, 0

@dataclasses.dataclass
class Product:
    name: str
    price: D

    def total(self) -> D:
        subtotal = self.price
        return subtotal

async def load_products():
    cache = []
    return cache

if __debug__:
    DEBUG_ONLY = True

try:
    from ujson import dumps
except ImportError:
    from json import dumps
"#,
    )?;

    let report = harness.index()?;
    let index = &report.index;

    assert_eq!(index.modules("annotations").unwrap(), &["__future__".to_string()]);
    assert_eq!(index.modules("Decimal").unwrap(), &["decimal".to_string()]);
    assert!(!index.contains("D"));
    assert!(!index.contains("dataclasses"));
    assert_eq!(index.modules("CURRENCY").unwrap(), &["shop.models".to_string()]);
    assert_eq!(index.modules("DEFAULT_TAX").unwrap(), &["shop.models".to_string()]);
    assert_eq!(index.modules("RATE").unwrap(), &["shop.models".to_string()]);
    assert!(!index.contains("_registry"));
    assert_eq!(index.modules("Product").unwrap(), &["shop.models".to_string()]);
    assert_eq!(
        index.modules("load_products").unwrap(),
        &["shop.models".to_string()]
    );

    // Nested and conditional names stay out of the index
    for name in ["name", "price", "total", "subtotal", "cache", "DEBUG_ONLY", "dumps"] {
        assert!(!index.contains(name), "{} should not be indexed", name);
    }

    assert!(report.diagnostics.is_empty());

    Ok(())
}

#[test]
fn test_traversal_order_is_lexical() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("zeta.py", "item = 1\n")?;
    harness.create_test_file("alpha/inner.py", "item = 2\n")?;
    harness.create_test_file("mid.py", "from alpha.inner import item\n")?;

    let report = harness.index()?;
    assert_eq!(
        report.index.modules("item").unwrap(),
        &[
            "alpha.inner".to_string(),
            "alpha.inner".to_string(),
            "zeta".to_string()
        ]
    );

    Ok(())
}

#[test]
fn test_bad_files_do_not_stop_the_scan() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_raw_file("latin1.py", b"name = 'caf\xe9'\n")?;
    harness.create_test_file("broken.py", "def f(:\n")?;
    harness.create_test_file("odd.py", "pass\nglobal thing\nkeep = 1\n")?;
    harness.create_test_file("star.py", "from pkg import *\n")?;

    let report = harness.index()?;

    assert_eq!(report.files_indexed, 2);
    assert_eq!(report.files_skipped, 2);
    assert_eq!(report.index.modules("keep").unwrap(), &["odd".to_string()]);

    let diagnostics = &report.diagnostics;
    assert_eq!(diagnostics.count(DiagnosticCategory::Decode), 1);
    assert_eq!(diagnostics.count(DiagnosticCategory::Syntax), 1);
    assert_eq!(diagnostics.count(DiagnosticCategory::UnrecognizedStatement), 2);
    assert_eq!(diagnostics.count(DiagnosticCategory::WildcardImport), 1);

    Ok(())
}

#[test]
fn test_non_python_files_are_ignored() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("notes.txt", "x = 1\n")?;
    harness.create_test_file("script.sh", "y=2\n")?;
    harness.create_test_file("__pycache__/cached.py", "z = 3\n")?;

    let report = harness.index()?;
    assert!(report.index.is_empty());
    assert_eq!(report.files_indexed, 0);

    Ok(())
}

#[test]
fn test_parallel_indexing_matches_sequential() -> Result<()> {
    let mut harness = TestHarness::new()?;
    for i in 0..30 {
        harness.create_test_file(
            &format!("pkg_{}/module_{}.py", i % 4, i),
            &format!("from common import shared\nlocal_{} = {}\n", i, i),
        )?;
    }

    let sequential = harness.index()?;

    harness.config.parallel = true;
    harness.config.parallel_threads = Some(3);
    let parallel = harness.index()?;

    assert_eq!(sequential.index, parallel.index);
    assert_eq!(parallel.index.modules("shared").unwrap().len(), 30);

    Ok(())
}

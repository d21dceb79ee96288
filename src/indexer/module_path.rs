//! Maps a source file location to its dotted Python module identifier.

use std::path::{Component, Path};

/// Resolve the dotted module identifier for `path` relative to `root`.
///
/// The extension is dropped and every remaining path component becomes one
/// dotted segment, so `root/a/b/c.py` resolves to `a.b.c`. Package
/// `__init__.py` files keep their name (`pkg/__init__.py` → `pkg.__init__`).
///
/// Returns `None` when `path` does not lie under `root` or has no file name.
pub fn module_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let stem = relative.with_extension("");

    let segments: Vec<String> = stem
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

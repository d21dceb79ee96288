use ignore::WalkBuilder;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::PathBuf;

use crate::config::IndexerConfig;

/// Walks a project tree and yields the Python source files in it
pub struct Walker {
    root: PathBuf,
    extensions: HashSet<String>,
    ignore_patterns: Vec<String>,
    respect_gitignore: bool,
    include_hidden: bool,
}

impl Walker {
    /// Create a new Walker with the given root directory and configuration
    pub fn new(root: PathBuf, config: &IndexerConfig) -> Self {
        Self {
            root,
            extensions: config.extensions.iter().cloned().collect(),
            ignore_patterns: config.ignore_patterns.clone(),
            respect_gitignore: config.respect_gitignore,
            include_hidden: config.include_hidden,
        }
    }

    /// Walk the directory tree and return an iterator of file paths
    ///
    /// The order is whatever the filesystem yields; callers needing a stable
    /// order sort the result (see [`Walker::collect_sorted`]).
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> {
        let mut builder = WalkBuilder::new(&self.root);

        builder.git_ignore(self.respect_gitignore);
        builder.git_global(self.respect_gitignore);
        builder.git_exclude(self.respect_gitignore);
        builder.ignore(self.respect_gitignore);
        builder.parents(self.respect_gitignore);
        builder.hidden(!self.include_hidden);

        let root = self.root.clone();
        let extensions = self.extensions.clone();
        let ignore_patterns = self.ignore_patterns.clone();

        builder
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(move |entry| {
                // Match ignore patterns against path components below the root,
                // so a root living under e.g. `build/` is still walked
                let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                !relative.components().any(|component| {
                    let part = component.as_os_str().to_string_lossy();
                    ignore_patterns.iter().any(|pattern| part == pattern.as_str())
                })
            })
            .filter(move |entry| {
                entry
                    .path()
                    .extension()
                    .and_then(OsStr::to_str)
                    .map(|ext| extensions.contains(ext))
                    .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
    }

    /// Collect all walkable files into a Vec
    pub fn collect_files(&self) -> Vec<PathBuf> {
        self.walk().collect()
    }

    /// Collect all walkable files, sorted lexically by path
    pub fn collect_sorted(&self) -> Vec<PathBuf> {
        let mut files = self.collect_files();
        files.sort();
        files
    }
}

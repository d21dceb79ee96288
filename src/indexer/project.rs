//! Project-wide indexing: walk a root, extract every file, aggregate.

use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::extractor::PythonExtractor;
use super::module_path::module_path;
use super::parser::{ParseError, PythonParser};
use super::walker::Walker;
use crate::config::{IndexerConfig, ParseErrorPolicy};
use crate::symbol::{SymbolBinding, SymbolIndex};

/// Errors that abort an indexing pass.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The Python grammar could not be loaded.
    #[error("Parser setup failed: {0}")]
    Parser(String),

    /// A file failed to parse under the abort policy.
    #[error("Syntax error in {} at line {line}, column {column}", .path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    /// The rayon pool for parallel indexing could not be built.
    #[error("Failed to build indexing thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A discovered source file and the module it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub module: String,
}

impl SourceFile {
    /// Resolve `path` against `root`; `None` if it lies outside the root
    pub fn resolve(path: PathBuf, root: &Path) -> Option<Self> {
        let module = module_path(&path, root)?;
        Some(Self { path, module })
    }
}

/// Outcome of indexing a whole project
#[derive(Debug, Default)]
pub struct IndexReport {
    pub index: SymbolIndex,
    pub diagnostics: Diagnostics,
    /// Files that contributed to the index
    pub files_indexed: usize,
    /// Files left out because of read, decode or syntax failures
    pub files_skipped: usize,
}

impl IndexReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's outcome into the report
    fn merge(&mut self, outcome: FileOutcome) {
        if outcome.skipped {
            self.files_skipped += 1;
        } else {
            self.files_indexed += 1;
        }
        self.index.extend(outcome.bindings);
        self.diagnostics.extend(outcome.diagnostics);
    }

    /// Get a summary string of the results
    pub fn summary(&self) -> String {
        format!(
            "Indexed {} files ({} skipped): {} symbols, {} bindings, {} diagnostics",
            self.files_indexed,
            self.files_skipped,
            self.index.symbol_count(),
            self.index.binding_count(),
            self.diagnostics.len()
        )
    }
}

/// Bindings and diagnostics produced by one file
#[derive(Debug, Default)]
struct FileOutcome {
    bindings: Vec<SymbolBinding>,
    diagnostics: Diagnostics,
    skipped: bool,
}

impl FileOutcome {
    fn skipped(path: &Path, kind: DiagnosticKind) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(path, kind);
        Self {
            bindings: Vec::new(),
            diagnostics,
            skipped: true,
        }
    }
}

/// Builds a fresh [`SymbolIndex`] for a project root on every call
pub struct ProjectIndexer {
    config: IndexerConfig,
    extractor: PythonExtractor,
}

impl ProjectIndexer {
    pub fn new(config: IndexerConfig) -> Self {
        Self {
            config,
            extractor: PythonExtractor,
        }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Walk `root` and index every Python file under it.
    ///
    /// A missing root or a root that is not a directory yields an empty
    /// report. Files are processed in lexical path order; with
    /// `parallel = true` they are parsed concurrently but merged in the same
    /// order, so both modes produce the same index.
    pub fn index(&self, root: &Path) -> Result<IndexReport, IndexError> {
        if !root.is_dir() {
            debug!("Root {} is not a directory, nothing to index", root.display());
            return Ok(IndexReport::new());
        }

        let start = Instant::now();
        let walker = Walker::new(root.to_path_buf(), &self.config);
        let files: Vec<SourceFile> = walker
            .collect_sorted()
            .into_iter()
            .filter_map(|path| {
                let resolved = SourceFile::resolve(path.clone(), root);
                if resolved.is_none() {
                    warn!("{} is outside {}, skipping", path.display(), root.display());
                }
                resolved
            })
            .collect();

        debug!("Found {} source files under {}", files.len(), root.display());

        let outcomes = if self.config.parallel {
            self.index_parallel(&files)?
        } else {
            self.index_sequential(&files)?
        };

        let mut report = IndexReport::new();
        for outcome in outcomes {
            report.merge(outcome);
        }

        info!(
            "{} in {:.2}s",
            report.summary(),
            start.elapsed().as_secs_f64()
        );

        Ok(report)
    }

    fn index_sequential(&self, files: &[SourceFile]) -> Result<Vec<FileOutcome>, IndexError> {
        let mut parser = PythonParser::new().map_err(|e| IndexError::Parser(e.to_string()))?;
        files
            .iter()
            .map(|file| self.index_file(&mut parser, file))
            .collect()
    }

    fn index_parallel(&self, files: &[SourceFile]) -> Result<Vec<FileOutcome>, IndexError> {
        let threads = self.config.parallel_threads.unwrap_or_else(num_cpus::get);
        debug!("Using {} threads for parallel indexing", threads);

        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

        // Gather every result first; the reported failure is the first in file order
        let results: Vec<Result<FileOutcome, IndexError>> = pool.install(|| {
            files
                .par_iter()
                .map_init(
                    || PythonParser::new().map_err(|e| e.to_string()),
                    |parser, file| match parser {
                        Ok(parser) => self.index_file(parser, file),
                        Err(e) => Err(IndexError::Parser(e.clone())),
                    },
                )
                .collect()
        });

        results.into_iter().collect()
    }

    /// Read, parse and extract a single file.
    ///
    /// Read and decode failures always skip the file; syntax errors skip or
    /// abort depending on the configured policy.
    fn index_file(
        &self,
        parser: &mut PythonParser,
        file: &SourceFile,
    ) -> Result<FileOutcome, IndexError> {
        let source = match read_source(&file.path) {
            Ok(source) => source,
            Err(kind) => return Ok(FileOutcome::skipped(&file.path, kind)),
        };

        let module = match parser.parse(&source) {
            Ok(module) => module,
            Err(ParseError::Syntax { line, column }) => {
                return match self.config.on_parse_error {
                    ParseErrorPolicy::Skip => Ok(FileOutcome::skipped(
                        &file.path,
                        DiagnosticKind::Syntax { line, column },
                    )),
                    ParseErrorPolicy::Abort => Err(IndexError::Syntax {
                        path: file.path.clone(),
                        line,
                        column,
                    }),
                };
            }
            Err(e) => return Err(IndexError::Parser(e.to_string())),
        };

        let mut diagnostics = Diagnostics::new();
        let mut seen = HashSet::new();
        // A file binding the same name to the same module twice counts once
        let bindings: Vec<SymbolBinding> = self
            .extractor
            .extract(&module, &file.module, &file.path, &mut diagnostics)
            .filter(|binding| seen.insert(binding.clone()))
            .collect();

        debug!(
            "{} ({}): {} bindings",
            file.path.display(),
            file.module,
            bindings.len()
        );

        Ok(FileOutcome {
            bindings,
            diagnostics,
            skipped: false,
        })
    }
}

impl Default for ProjectIndexer {
    fn default() -> Self {
        Self::new(IndexerConfig::default())
    }
}

/// Read a file fully as UTF-8 text, dropping a leading byte order mark
fn read_source(path: &Path) -> Result<String, DiagnosticKind> {
    let bytes = fs::read(path).map_err(|e| DiagnosticKind::Read {
        error: e.to_string(),
    })?;

    let text = String::from_utf8(bytes).map_err(|e| DiagnosticKind::Decode {
        error: e.utf8_error().to_string(),
    })?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

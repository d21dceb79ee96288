//! Per-file diagnostics collected during an indexing pass.
//!
//! None of these abort indexing; they are surfaced through the report so a
//! caller can inspect or print them instead of relying on console output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Category of a diagnostic, used for grouping in reports
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum DiagnosticCategory {
    Read,
    Decode,
    Syntax,
    UnrecognizedStatement,
    WildcardImport,
}

impl std::fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticCategory::Read => write!(f, "Read"),
            DiagnosticCategory::Decode => write!(f, "Decode"),
            DiagnosticCategory::Syntax => write!(f, "Syntax"),
            DiagnosticCategory::UnrecognizedStatement => write!(f, "Unrecognized statement"),
            DiagnosticCategory::WildcardImport => write!(f, "Wildcard import"),
        }
    }
}

/// What went wrong (or was worth noting) in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The file could not be read
    Read { error: String },
    /// The file is not valid UTF-8
    Decode { error: String },
    /// The file is not valid Python and was left out of the index
    Syntax { line: usize, column: usize },
    /// A top-level statement kind with no binding rule
    UnrecognizedStatement { kind: String, line: usize },
    /// `from module import *`, which binds nothing
    WildcardImport { module: String, line: usize },
}

impl DiagnosticKind {
    pub fn category(&self) -> DiagnosticCategory {
        match self {
            DiagnosticKind::Read { .. } => DiagnosticCategory::Read,
            DiagnosticKind::Decode { .. } => DiagnosticCategory::Decode,
            DiagnosticKind::Syntax { .. } => DiagnosticCategory::Syntax,
            DiagnosticKind::UnrecognizedStatement { .. } => {
                DiagnosticCategory::UnrecognizedStatement
            }
            DiagnosticKind::WildcardImport { .. } => DiagnosticCategory::WildcardImport,
        }
    }

    /// Whether the whole file was dropped from the index
    pub fn skips_file(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::Read { .. } | DiagnosticKind::Decode { .. } | DiagnosticKind::Syntax { .. }
        )
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::Read { error } => write!(f, "read failed: {}", error),
            DiagnosticKind::Decode { error } => write!(f, "not valid UTF-8: {}", error),
            DiagnosticKind::Syntax { line, column } => {
                write!(f, "syntax error at {}:{}", line, column)
            }
            DiagnosticKind::UnrecognizedStatement { kind, line } => {
                write!(f, "unrecognized statement '{}' at line {}", kind, line)
            }
            DiagnosticKind::WildcardImport { module, line } => {
                write!(f, "wildcard import from '{}' at line {}", module, line)
            }
        }
    }
}

/// A diagnostic attached to a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub kind: DiagnosticKind,
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a log event
    pub fn record(&mut self, path: &Path, kind: DiagnosticKind) {
        if kind.skips_file() {
            warn!("Skipping {}: {}", path.display(), kind);
        } else {
            debug!("{}: {}", path.display(), kind);
        }

        self.entries.push(Diagnostic {
            path: path.to_path_buf(),
            kind,
        });
    }

    /// Append another collection, keeping its order
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of diagnostics in a category
    pub fn count(&self, category: DiagnosticCategory) -> usize {
        self.entries
            .iter()
            .filter(|d| d.kind.category() == category)
            .count()
    }

    /// Group diagnostics by category, in category order
    pub fn by_category(&self) -> BTreeMap<DiagnosticCategory, Vec<&Diagnostic>> {
        let mut grouped: BTreeMap<DiagnosticCategory, Vec<&Diagnostic>> = BTreeMap::new();

        for diagnostic in &self.entries {
            grouped
                .entry(diagnostic.kind.category())
                .or_default()
                .push(diagnostic);
        }

        grouped
    }

    /// Print a summary of the diagnostics to stderr
    pub fn print_summary(&self) {
        if self.entries.is_empty() {
            eprintln!("No diagnostics");
            return;
        }

        eprintln!("{} diagnostics", self.entries.len());

        for (category, diagnostics) in self.by_category() {
            eprintln!("  {}: {}", category, diagnostics.len());

            // Show up to 5 examples per category
            for diagnostic in diagnostics.iter().take(5) {
                eprintln!("    - {}: {}", diagnostic.path.display(), diagnostic.kind);
            }

            if diagnostics.len() > 5 {
                eprintln!("    ... and {} more", diagnostics.len() - 5);
            }
        }
    }
}

pub mod diagnostics;
pub mod extractor;
pub mod module_path;
pub mod parser;
pub mod project;
pub mod walker;

pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticKind, Diagnostics};
pub use extractor::{Bindings, PythonExtractor};
pub use module_path::module_path;
pub use parser::{AssignTarget, ParseError, ParsedModule, PythonParser, Statement, StatementNode};
pub use project::{IndexError, IndexReport, ProjectIndexer, SourceFile};
pub use walker::Walker;

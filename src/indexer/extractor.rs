//! Python symbol extractor.
//!
//! Classifies each top-level statement of a parsed module and yields the
//! `(symbol, module)` bindings it makes importable:
//!
//! - assignments and annotated assignments bind simple names to this module
//! - `from M import a` binds `a` to `M` as written
//! - function, async function and class definitions bind their name
//! - plain `import M` and control-flow statements bind nothing
//! - any other statement kind binds nothing and is recorded as a diagnostic

use std::path::Path;

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::parser::{AssignTarget, ParsedModule, Statement, StatementNode};
use crate::symbol::SymbolBinding;

/// Python language symbol extractor.
pub struct PythonExtractor;

impl PythonExtractor {
    /// Stream the bindings exposed by `module`'s top level.
    ///
    /// `module_path` is the dotted identifier of the file itself; `path` is
    /// only used to attribute diagnostics.
    pub fn extract<'a>(
        &self,
        module: &'a ParsedModule,
        module_path: &'a str,
        path: &'a Path,
        diagnostics: &'a mut Diagnostics,
    ) -> Bindings<'a> {
        Bindings {
            statements: module.statements.iter(),
            pending: Vec::new().into_iter(),
            module_path,
            path,
            diagnostics,
        }
    }
}

/// Finite, single-pass iterator over the bindings of one module.
pub struct Bindings<'a> {
    statements: std::slice::Iter<'a, StatementNode>,
    pending: std::vec::IntoIter<SymbolBinding>,
    module_path: &'a str,
    path: &'a Path,
    diagnostics: &'a mut Diagnostics,
}

impl Iterator for Bindings<'_> {
    type Item = SymbolBinding;

    fn next(&mut self) -> Option<SymbolBinding> {
        loop {
            if let Some(binding) = self.pending.next() {
                return Some(binding);
            }

            let node = self.statements.next()?;
            self.pending = self.classify(node).into_iter();
        }
    }
}

impl Bindings<'_> {
    fn local(&self, name: &str) -> SymbolBinding {
        SymbolBinding::new(name, self.module_path)
    }

    fn classify(&mut self, node: &StatementNode) -> Vec<SymbolBinding> {
        match &node.statement {
            Statement::Assign { targets } => targets
                .iter()
                .filter_map(|target| match target {
                    AssignTarget::Name(name) => Some(self.local(name)),
                    _ => None,
                })
                .collect(),

            Statement::AnnAssign { target } => match target {
                AssignTarget::Name(name) => vec![self.local(name)],
                _ => Vec::new(),
            },

            Statement::ImportFrom {
                module,
                names,
                wildcard,
            } => {
                if *wildcard {
                    self.diagnostics.record(
                        self.path,
                        DiagnosticKind::WildcardImport {
                            module: module.clone(),
                            line: node.line,
                        },
                    );
                }
                names
                    .iter()
                    .map(|name| SymbolBinding::new(name, module))
                    .collect()
            }

            // Importing a module does not define a symbol of this module
            Statement::Import => Vec::new(),

            Statement::FunctionDef { name }
            | Statement::AsyncFunctionDef { name }
            | Statement::ClassDef { name } => vec![self.local(name)],

            Statement::Expr
            | Statement::For
            | Statement::Try
            | Statement::If
            | Statement::With
            | Statement::Delete
            | Statement::AugAssign
            | Statement::Raise
            | Statement::While
            | Statement::Assert => Vec::new(),

            Statement::Other { kind } => {
                self.diagnostics.record(
                    self.path,
                    DiagnosticKind::UnrecognizedStatement {
                        kind: kind.clone(),
                        line: node.line,
                    },
                );
                Vec::new()
            }
        }
    }
}

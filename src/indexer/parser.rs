//! Tree-sitter backed Python parser.
//!
//! Parses a file's text and lowers its top-level statements into the closed
//! [`Statement`] union consumed by the extractor. Nested bodies are never
//! lowered.

use thiserror::Error;
use tracing::trace;
use tree_sitter::{Node, Parser, Point, Tree};

/// Errors raised while parsing a single file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The Python grammar could not be loaded into the parser.
    #[error("Failed to load Python grammar: {0}")]
    Language(String),

    /// The source is not syntactically valid Python.
    #[error("Syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    /// Tree-sitter gave up without producing a tree.
    #[error("Parser produced no syntax tree")]
    NoTree,
}

/// Target of a plain or annotated assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignTarget {
    /// A bare identifier: `x = ...`
    Name(String),
    /// `obj.attr = ...`
    Attribute,
    /// `obj[key] = ...`
    Subscript,
    /// Tuple, list or starred destructuring: `a, b = ...`
    Unpack,
    /// Anything else the grammar accepts on the left-hand side
    Other,
}

/// A top-level Python statement, reduced to what symbol extraction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `a = b = value`; one target per `=` in the chain
    Assign { targets: Vec<AssignTarget> },
    /// `x: T = value` or `x: T`
    AnnAssign { target: AssignTarget },
    /// `from module import a, b as c`; `names` are the original names
    ImportFrom {
        module: String,
        names: Vec<String>,
        wildcard: bool,
    },
    /// `import module`
    Import,
    FunctionDef { name: String },
    AsyncFunctionDef { name: String },
    ClassDef { name: String },
    Expr,
    For,
    Try,
    If,
    With,
    Delete,
    AugAssign,
    Raise,
    While,
    Assert,
    /// Any statement kind without an explicit mapping, keyed by grammar kind
    Other { kind: String },
}

/// One top-level statement and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementNode {
    pub line: usize,
    pub statement: Statement,
}

/// The top-level statement sequence of one parsed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedModule {
    pub statements: Vec<StatementNode>,
}

impl ParsedModule {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Reusable tree-sitter parser configured for Python.
///
/// A parser is not shareable across threads; parallel indexing creates one
/// per worker.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a parser with the Python grammar loaded.
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse `source` and lower its top-level statements.
    ///
    /// Any ERROR or MISSING node in the tree is reported as a syntax error at
    /// the position of the first such node.
    pub fn parse(&mut self, source: &str) -> Result<ParsedModule, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();

        if root.has_error() {
            let (line, column) = first_error_position(&tree);
            return Err(ParseError::Syntax { line, column });
        }

        let bytes = source.as_bytes();
        let mut cursor = root.walk();
        let nodes: Vec<Node> = root
            .named_children(&mut cursor)
            .filter(|node| !node.is_extra())
            .collect();

        if let Some(position) = nodes.iter().find_map(chained_annotation) {
            return Err(ParseError::Syntax {
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        let statements = nodes
            .iter()
            .map(|node| StatementNode {
                line: node.start_position().row + 1,
                statement: lower_statement(node, bytes),
            })
            .collect();

        Ok(ParsedModule { statements })
    }
}

/// Locate the first ERROR or MISSING node in document order (1-based).
fn first_error_position(tree: &Tree) -> (usize, usize) {
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let position = node.start_position();
            return (position.row + 1, position.column + 1);
        }

        // Only descend into subtrees that contain the error
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                let position = tree.root_node().start_position();
                return (position.row + 1, position.column + 1);
            }
        }
    }
}

/// The grammar accepts an annotation inside an assignment chain
/// (`a = b: int = 1`, `a: int = b = 1`), which Python rejects. Returns the
/// start of the offending link.
fn chained_annotation(statement: &Node) -> Option<Point> {
    if statement.kind() != "expression_statement" {
        return None;
    }

    let mut current = statement.named_child(0)?;
    if current.kind() != "assignment" {
        return None;
    }

    while let Some(right) = current.child_by_field_name("right") {
        if right.kind() != "assignment" {
            break;
        }
        if current.child_by_field_name("type").is_some()
            || right.child_by_field_name("type").is_some()
        {
            return Some(right.start_position());
        }
        current = right;
    }

    None
}

fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Dotted names may legally contain whitespace (`a . b`); drop it.
fn compact_text(node: &Node, source: &[u8]) -> String {
    node_text(node, source).split_whitespace().collect()
}

fn lower_statement(node: &Node, source: &[u8]) -> Statement {
    match node.kind() {
        "expression_statement" => lower_expression_statement(node, source),
        "import_from_statement" => lower_import_from(node, source),
        "future_import_statement" => Statement::ImportFrom {
            module: "__future__".to_string(),
            names: imported_names(node, source),
            wildcard: false,
        },
        "import_statement" => Statement::Import,
        "function_definition" | "class_definition" => lower_definition(node, source),
        "decorated_definition" => match node.child_by_field_name("definition") {
            Some(definition) => lower_definition(&definition, source),
            None => Statement::Other {
                kind: node.kind().to_string(),
            },
        },
        "for_statement" => Statement::For,
        "try_statement" => Statement::Try,
        "if_statement" => Statement::If,
        "with_statement" => Statement::With,
        "delete_statement" => Statement::Delete,
        "raise_statement" => Statement::Raise,
        "while_statement" => Statement::While,
        "assert_statement" => Statement::Assert,
        other => Statement::Other {
            kind: other.to_string(),
        },
    }
}

fn lower_expression_statement(node: &Node, source: &[u8]) -> Statement {
    let Some(expression) = node.named_child(0) else {
        return Statement::Expr;
    };

    match expression.kind() {
        "assignment" if expression.child_by_field_name("type").is_some() => {
            let target = expression
                .child_by_field_name("left")
                .map(|left| lower_target(&left, source))
                .unwrap_or(AssignTarget::Other);
            Statement::AnnAssign { target }
        }
        "assignment" => Statement::Assign {
            targets: assignment_targets(expression, source),
        },
        "augmented_assignment" => Statement::AugAssign,
        _ => Statement::Expr,
    }
}

/// Collect the targets of `a = b = c = value`, which the grammar nests as
/// right-recursive assignments.
fn assignment_targets(mut assignment: Node, source: &[u8]) -> Vec<AssignTarget> {
    let mut targets = Vec::new();

    loop {
        if let Some(left) = assignment.child_by_field_name("left") {
            targets.push(lower_target(&left, source));
        }

        match assignment.child_by_field_name("right") {
            Some(right)
                if right.kind() == "assignment"
                    && right.child_by_field_name("type").is_none() =>
            {
                assignment = right;
            }
            _ => break,
        }
    }

    targets
}

fn lower_target(node: &Node, source: &[u8]) -> AssignTarget {
    match node.kind() {
        "identifier" | "keyword_identifier" => {
            AssignTarget::Name(node_text(node, source).to_string())
        }
        "attribute" => AssignTarget::Attribute,
        "subscript" => AssignTarget::Subscript,
        // `(a) = 1` is a plain name target; `(a,) = 1` unpacks
        "tuple_pattern" | "parenthesized_expression" => match parenthesized_target(node) {
            Some(inner) => lower_target(&inner, source),
            None => AssignTarget::Unpack,
        },
        "pattern_list" | "list_pattern" | "list_splat_pattern" => AssignTarget::Unpack,
        other => {
            trace!("Unhandled assignment target kind: {}", other);
            AssignTarget::Other
        }
    }
}

/// The single element of a parenthesized, comma-free tuple pattern.
fn parenthesized_target<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let mut elements = Vec::new();
    for child in node.children(&mut cursor) {
        if child.kind() == "," {
            return None;
        }
        if child.is_named() && !child.is_extra() {
            elements.push(child);
        }
    }

    if elements.len() == 1 {
        elements.pop()
    } else {
        None
    }
}

fn lower_import_from(node: &Node, source: &[u8]) -> Statement {
    let module = node
        .child_by_field_name("module_name")
        .map(|name| compact_text(&name, source))
        .unwrap_or_default();

    let mut cursor = node.walk();
    let wildcard = node
        .named_children(&mut cursor)
        .any(|child| child.kind() == "wildcard_import");

    Statement::ImportFrom {
        module,
        names: imported_names(node, source),
        wildcard,
    }
}

/// Original (pre-alias) names of a `from ... import` list.
fn imported_names(node: &Node, source: &[u8]) -> Vec<String> {
    let mut cursor = node.walk();
    let names = node
        .children_by_field_name("name", &mut cursor)
        .filter_map(|name| match name.kind() {
            "aliased_import" => name
                .child_by_field_name("name")
                .map(|original| compact_text(&original, source)),
            _ => Some(compact_text(&name, source)),
        })
        .collect();
    names
}

fn lower_definition(node: &Node, source: &[u8]) -> Statement {
    let name = node
        .child_by_field_name("name")
        .map(|name| node_text(&name, source).to_string())
        .unwrap_or_default();

    match node.kind() {
        "class_definition" => Statement::ClassDef { name },
        "function_definition" if is_async(node) => Statement::AsyncFunctionDef { name },
        "function_definition" => Statement::FunctionDef { name },
        other => Statement::Other {
            kind: other.to_string(),
        },
    }
}

fn is_async(node: &Node) -> bool {
    let mut cursor = node.walk();
    let is_async = node
        .children(&mut cursor)
        .take_while(|child| child.kind() != "def")
        .any(|child| child.kind() == "async");
    is_async
}

//! Java parser adapter built on tree-sitter
//!
//! Parse failures are reported as a [`ParseOutcome::Failure`] value, never as an
//! error: a file that does not parse is still counted and reported.

use crate::error::{CodequalError, Result};
use tree_sitter::{Node, Parser, Tree};

/// A successfully parsed file: the tree together with the text it was built from
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    tree: Tree,
    source: String,
}

impl SyntaxTree {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }
}

/// Result of handing one file's text to a parser
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Success(SyntaxTree),
    Failure { reason: String },
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }
}

/// Converts source text into a syntax tree.
///
/// Implementations are shared across worker threads.
pub trait SourceParser: Send + Sync {
    fn parse(&self, source: &str) -> ParseOutcome;
}

/// tree-sitter backed parser for Java sources
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaParser;

impl JavaParser {
    /// Create the parser, checking once that the grammar loads
    pub fn new() -> Result<Self> {
        new_parser()?;
        Ok(JavaParser)
    }
}

fn new_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| CodequalError::ParserSetup {
            message: format!("Failed to set Java language: {}", e),
        })?;
    Ok(parser)
}

impl SourceParser for JavaParser {
    fn parse(&self, source: &str) -> ParseOutcome {
        // tree_sitter::Parser is not Sync, so each parse gets its own
        let mut parser = match new_parser() {
            Ok(parser) => parser,
            Err(e) => {
                return ParseOutcome::Failure {
                    reason: e.to_string(),
                }
            }
        };

        let Some(tree) = parser.parse(source, None) else {
            return ParseOutcome::Failure {
                reason: "parser returned no tree".to_string(),
            };
        };

        let root = tree.root_node();
        if root.has_error() {
            let reason = match first_error(root) {
                Some(node) => {
                    let pos = node.start_position();
                    let what = if node.is_missing() {
                        format!("missing `{}`", node.kind())
                    } else {
                        "unexpected syntax".to_string()
                    };
                    format!("{} at line {}, column {}", what, pos.row + 1, pos.column + 1)
                }
                None => "syntax error".to_string(),
            };
            return ParseOutcome::Failure { reason };
        }

        ParseOutcome::Success(SyntaxTree {
            tree,
            source: source.to_string(),
        })
    }
}

/// First error or missing node in document order
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        // only subtrees that contain an error are entered
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

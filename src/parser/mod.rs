//! Syntax tree loading for Python source.
//!
//! Wraps tree-sitter-python. tree-sitter always yields a tree, so a parse
//! "failure" here means the tree contains ERROR or missing nodes; the
//! loader converts the first such node into a [`SyntaxErrorInfo`] instead
//! of handing a broken tree downstream.

use serde::{Deserialize, Serialize};
use tree_sitter::{Language, Node, Parser as TsParser, Tree};

/// Structured record of a parse failure.
///
/// Mirrors what a conformant Python parser reports: a message, the
/// 1-based line, and the offending source line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} (line {line}: {text:?})")]
pub struct SyntaxErrorInfo {
    pub message: String,
    pub line: usize,
    pub text: String,
}

/// A successfully parsed source unit.
///
/// Owns both the tree and the byte buffer the tree's nodes point into.
#[derive(Debug)]
pub struct ParsedSource {
    pub tree: Tree,
    pub source: Vec<u8>,
}

impl ParsedSource {
    /// Root node of the parsed program.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text of a node within this source.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

fn python_language() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

/// Parse Python source text.
///
/// Never panics on malformed input: anything the grammar rejects comes
/// back as a [`SyntaxErrorInfo`].
pub fn parse(source: &str) -> Result<ParsedSource, SyntaxErrorInfo> {
    let mut parser = TsParser::new();
    if parser.set_language(&python_language()).is_err() {
        return Err(SyntaxErrorInfo {
            message: "parser initialization failed".to_string(),
            line: 1,
            text: String::new(),
        });
    }

    let tree = match parser.parse(source, None) {
        Some(tree) => tree,
        None => {
            return Err(SyntaxErrorInfo {
                message: "parser produced no tree".to_string(),
                line: 1,
                text: String::new(),
            })
        }
    };

    let root = tree.root_node();
    if root.has_error() {
        return Err(describe_error(root, source));
    }

    Ok(ParsedSource {
        tree,
        source: source.as_bytes().to_vec(),
    })
}

/// Locate the first ERROR or missing node, pre-order.
fn first_error<'a>(node: Node<'a>) -> Option<Node<'a>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

fn describe_error(root: Node, source: &str) -> SyntaxErrorInfo {
    let node = match first_error(root) {
        Some(n) => n,
        // has_error() without a locatable node should not happen; fall
        // back to a generic record at the top of the file.
        None => {
            return SyntaxErrorInfo {
                message: "invalid syntax".to_string(),
                line: 1,
                text: String::new(),
            }
        }
    };

    let row = node.start_position().row;
    let fragment = source
        .lines()
        .nth(row)
        .map(|l| l.trim().to_string())
        .unwrap_or_default();

    let message = if node.is_missing() {
        format!("missing {}", node.kind())
    } else {
        "invalid syntax".to_string()
    };

    SyntaxErrorInfo {
        message,
        line: row + 1,
        text: fragment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_valid_source() {
        let parsed = parse("x = 1\ny = 2\n").unwrap();
        assert_eq!(parsed.root().kind(), "module");
        assert!(!parsed.root().has_error());
    }

    #[test]
    fn test_parses_empty_source() {
        let parsed = parse("").unwrap();
        assert_eq!(parsed.root().named_child_count(), 0);
    }

    #[test]
    fn test_unmatched_paren_is_syntax_error() {
        let err = parse("def f(:\n    pass\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_error_reports_offending_line() {
        let err = parse("x = 1\ny = ((2\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.text.contains("y ="));
    }

    #[test]
    fn test_node_text() {
        let parsed = parse("value = 42\n").unwrap();
        let stmt = parsed.root().named_child(0).unwrap();
        assert_eq!(parsed.node_text(stmt), "value = 42");
    }
}

//! Maintainability index for a whole source unit.
//!
//! Uses the normalized composite formula:
//!
//! ```text
//! MI = max(0, (171 - 5.2*ln(V) - 0.23*CC - 16.2*ln(SLOC)) * 100 / 171)
//! ```
//!
//! where V is the Halstead volume, CC the unit's cyclomatic complexity,
//! and SLOC the source line count excluding blanks, comments, and
//! docstrings.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#.*").unwrap());
static DOCSTRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)(""".*?"""|'''.*?''')"#).unwrap());

/// Compute the maintainability index, or `None` when the unit is too
/// small to score (no code lines or no measurable vocabulary).
pub fn index(source: &str, root: Node, bytes: &[u8], complexity: f64) -> Option<f64> {
    let sloc = source_lines(source);
    if sloc == 0 {
        // Nothing to maintain; treat as perfectly maintainable.
        return Some(100.0);
    }

    let volume = halstead_volume(root, bytes);
    if volume <= 0.0 {
        return Some(100.0);
    }

    let raw = 171.0 - 5.2 * volume.ln() - 0.23 * complexity - 16.2 * (sloc as f64).ln();
    Some((raw * 100.0 / 171.0).clamp(0.0, 100.0))
}

/// Non-blank source lines after stripping comments and docstrings.
fn source_lines(source: &str) -> usize {
    let no_comments = COMMENT_RE.replace_all(source, "");
    let no_docstrings = DOCSTRING_RE.replace_all(&no_comments, "");
    no_docstrings
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count()
}

/// Halstead volume: V = N * log2(n) over operator/operand tallies.
fn halstead_volume(root: Node, bytes: &[u8]) -> f64 {
    let mut counter = HalsteadCounter::default();
    counter.scan(root, bytes);
    counter.volume()
}

#[derive(Default)]
struct HalsteadCounter {
    operators: HashMap<String, usize>,
    operands: HashMap<String, usize>,
}

impl HalsteadCounter {
    fn scan(&mut self, node: Node, bytes: &[u8]) {
        match node.kind() {
            "comment" => return,
            // Whole literals and names are operands; don't descend into
            // string internals.
            "identifier" | "integer" | "float" | "true" | "false" | "none" | "string" => {
                let text = node.utf8_text(bytes).unwrap_or("").to_string();
                *self.operands.entry(text).or_insert(0) += 1;
                return;
            }
            _ => {}
        }

        if node.child_count() == 0 {
            // Remaining leaves are grammar tokens: keywords, punctuation,
            // operators.
            if !node.is_named() {
                *self.operators.entry(node.kind().to_string()).or_insert(0) += 1;
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.scan(child, bytes);
        }
    }

    fn volume(&self) -> f64 {
        let distinct = (self.operators.len() + self.operands.len()) as f64;
        let total: usize = self.operators.values().sum::<usize>() + self.operands.values().sum::<usize>();
        if distinct < 2.0 || total == 0 {
            return 0.0;
        }
        total as f64 * distinct.log2()
    }
}

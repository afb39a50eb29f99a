//! Complexity and maintainability evaluation.
//!
//! The engine never computes these itself; it asks a
//! [`ComplexityEvaluator`] handed to it at construction. The built-in
//! [`AstEvaluator`] scores cyclomatic complexity per function by counting
//! branch points with a tree-sitter query, and derives one maintainability
//! index for the whole unit. Anything that fails inside an evaluator
//! degrades to absent values, never to an aborted run.

pub mod maintainability;

use std::collections::HashMap;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser as TsParser, Query, QueryCursor};

/// Branch points counted toward cyclomatic complexity.
///
/// Covers conditionals, loops, exception handlers, resource blocks,
/// ternaries, short-circuit operators, and comprehensions.
const BRANCH_QUERY: &str = r#"
(if_statement) @branch
(elif_clause) @branch
(for_statement) @branch
(while_statement) @branch
(except_clause) @branch
(with_statement) @branch
(conditional_expression) @branch
(boolean_operator operator: "and") @branch
(boolean_operator operator: "or") @branch
(list_comprehension) @branch
(dictionary_comprehension) @branch
(set_comprehension) @branch
(generator_expression) @branch
"#;

/// Query for locating function definitions with their names.
const FUNCTION_QUERY: &str = r#"
(function_definition name: (identifier) @name) @func
"#;

/// Per-symbol complexity plus a unit-wide maintainability index.
///
/// An entry missing from the map means "not computed" and must be kept
/// distinct from a computed 0.
#[derive(Debug, Clone, Default)]
pub struct ComplexityIndex {
    per_symbol: HashMap<(String, usize), f64>,
    pub maintainability: Option<f64>,
}

impl ComplexityIndex {
    pub fn insert(&mut self, name: impl Into<String>, line: usize, complexity: f64) {
        self.per_symbol.insert((name.into(), line), complexity);
    }

    /// Exact-match lookup by symbol name and 1-based starting line.
    pub fn lookup(&self, name: &str, line: usize) -> Option<f64> {
        self.per_symbol.get(&(name.to_string(), line)).copied()
    }

    /// Arithmetic mean over all scored symbols; `None` when none scored.
    pub fn average(&self) -> Option<f64> {
        if self.per_symbol.is_empty() {
            return None;
        }
        let sum: f64 = self.per_symbol.values().sum();
        Some(sum / self.per_symbol.len() as f64)
    }

    pub fn scored_count(&self) -> usize {
        self.per_symbol.len()
    }
}

/// Evaluates complexity signals over raw source text.
pub trait ComplexityEvaluator: Send + Sync {
    fn evaluate(&self, source: &str) -> anyhow::Result<ComplexityIndex>;
}

/// Built-in evaluator backed by tree-sitter queries.
#[derive(Debug, Default)]
pub struct AstEvaluator;

impl AstEvaluator {
    pub fn new() -> Self {
        Self
    }

    fn language() -> Language {
        tree_sitter_python::LANGUAGE.into()
    }
}

impl ComplexityEvaluator for AstEvaluator {
    fn evaluate(&self, source: &str) -> anyhow::Result<ComplexityIndex> {
        let language = Self::language();
        let mut parser = TsParser::new();
        parser.set_language(&language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse source"))?;
        let root = tree.root_node();
        let bytes = source.as_bytes();

        let func_query = Query::new(&language, FUNCTION_QUERY)?;
        let branch_query = Query::new(&language, BRANCH_QUERY)?;

        let mut index = ComplexityIndex::default();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&func_query, root, bytes);

        while let Some(m) = matches.next() {
            let mut func_node = None;
            let mut func_name = None;

            for capture in m.captures {
                match func_query.capture_names()[capture.index as usize] {
                    "func" => func_node = Some(capture.node),
                    "name" => func_name = Some(capture.node.utf8_text(bytes).unwrap_or("")),
                    _ => {}
                }
            }

            if let (Some(node), Some(name)) = (func_node, func_name) {
                if name.is_empty() {
                    continue;
                }
                // CC = 1 + branch points within the function node.
                let mut branch_cursor = QueryCursor::new();
                let mut branches = branch_cursor.matches(&branch_query, node, bytes);
                let mut cc = 1usize;
                while branches.next().is_some() {
                    cc += 1;
                }
                index.insert(name, node.start_position().row + 1, cc as f64);
            }
        }

        // Unit-wide CC feeds the maintainability formula.
        let mut unit_cursor = QueryCursor::new();
        let mut unit_branches = unit_cursor.matches(&branch_query, root, bytes);
        let mut unit_cc = 1usize;
        while unit_branches.next().is_some() {
            unit_cc += 1;
        }

        index.maintainability = maintainability::index(source, root, bytes, unit_cc as f64);

        Ok(index)
    }
}

//! Result structures produced by the analysis engine.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::parser::SyntaxErrorInfo;

/// The node kinds surfaced as a fixed-key subset of the frequency table.
pub const TRACKED_NODE_KINDS: [&str; 10] = [
    "if_statement",
    "for_statement",
    "while_statement",
    "call",
    "assignment",
    "attribute",
    "binary_operator",
    "try_statement",
    "function_definition",
    "class_definition",
];

/// Occurrence counts per node kind across a whole tree.
pub type NodeFrequencyTable = HashMap<String, usize>;

/// Structural record for one function definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// 1-based starting line.
    pub line: usize,
    /// 1-based ending line.
    pub end_line: usize,
    /// `end_line - line + 1`.
    pub loc: usize,
    /// Ordinary positional parameter names, declaration order.
    pub args: Vec<String>,
    /// Cyclomatic complexity, when the evaluator scored this symbol.
    /// `None` means not computed, which is distinct from 0.
    pub complexity: Option<f64>,
}

/// Structural record for one class definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub line: usize,
    pub end_line: usize,
    pub loc: usize,
    /// Direct-child function definitions only.
    pub method_count: usize,
}

/// One normalized finding from the external linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub line: Option<usize>,
    pub code: String,
    pub message: String,
}

/// Everything one analysis run produces.
///
/// On parse failure `syntax_error` is populated and every tree-dependent
/// field holds its zero value; see [`AnalysisResult::syntax_failure`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_lines: usize,
    pub function_count: usize,
    pub class_count: usize,
    pub import_count: usize,
    pub average_complexity: Option<f64>,
    pub maintainability_index: Option<f64>,
    pub max_nesting_depth: usize,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub suggestions: Vec<Suggestion>,
    pub node_frequency: NodeFrequencyTable,
    /// The ten tracked kinds, always present, zero-filled.
    pub tracked_nodes: BTreeMap<String, usize>,
    pub insights: Vec<String>,
    /// Primary (deduction-based) quality score in [0, 100].
    pub quality_score: i32,
    /// Alternative (award-based) score in [0, 100]; kept separate from
    /// `quality_score`, the two schemes are not interchangeable.
    pub award_score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_error: Option<SyntaxErrorInfo>,
}

impl AnalysisResult {
    /// Result shell for a source unit that failed to parse: the error
    /// record plus zeroed structural fields. Only the raw-text line count
    /// survives.
    pub fn syntax_failure(total_lines: usize, error: SyntaxErrorInfo) -> Self {
        Self {
            total_lines,
            function_count: 0,
            class_count: 0,
            import_count: 0,
            average_complexity: None,
            maintainability_index: None,
            max_nesting_depth: 0,
            functions: Vec::new(),
            classes: Vec::new(),
            suggestions: Vec::new(),
            node_frequency: NodeFrequencyTable::new(),
            tracked_nodes: zero_tracked_nodes(),
            insights: Vec::new(),
            quality_score: 0,
            award_score: 0,
            syntax_error: Some(error),
        }
    }
}

/// Fixed-key tracked-node map with every count at zero.
pub fn zero_tracked_nodes() -> BTreeMap<String, usize> {
    TRACKED_NODE_KINDS
        .iter()
        .map(|k| (k.to_string(), 0))
        .collect()
}

/// Project the frequency table onto the ten tracked kinds.
pub fn tracked_nodes(frequency: &NodeFrequencyTable) -> BTreeMap<String, usize> {
    TRACKED_NODE_KINDS
        .iter()
        .map(|k| (k.to_string(), frequency.get(*k).copied().unwrap_or(0)))
        .collect()
}

//! The static-analysis engine.
//!
//! One [`Engine`] call runs every stage in order over a single
//! [`SourceUnit`]:
//!
//! 1. parse the text into a syntax tree (a failure short-circuits to the
//!    error shell)
//! 2. structural visitor walk and nesting analysis over the tree
//! 3. complexity evaluation, when the capability is present
//! 4. per-function and per-class detail records, joined with complexity
//! 5. external lint pass, when the capability and a path are present
//! 6. insight classification and both quality scores
//!
//! Tool availability is a constructor-time decision carried in
//! [`Capabilities`]; there is no ambient global state, and runs share
//! nothing, so concurrent analyses need no locking.

mod details;
mod facts;
mod insights;
mod nesting;
mod visitor;

pub use facts::{
    tracked_nodes, zero_tracked_nodes, AnalysisResult, ClassInfo, FunctionInfo,
    NodeFrequencyTable, Suggestion, TRACKED_NODE_KINDS,
};
pub use nesting::max_nesting_depth;
pub use visitor::StructuralVisitor;

use crate::lint::Linter;
use crate::metrics::{ComplexityEvaluator, ComplexityIndex};
use crate::parser;
use crate::score;
use crate::source::SourceUnit;

/// Optional external tools available to the engine.
///
/// `None` means the capability is absent and the corresponding result
/// fields stay absent/empty.
#[derive(Default)]
pub struct Capabilities {
    pub complexity: Option<Box<dyn ComplexityEvaluator>>,
    pub linter: Option<Box<dyn Linter>>,
}

impl Capabilities {
    /// Built-in complexity evaluator plus the default pylint adapter.
    pub fn full() -> Self {
        Self {
            complexity: Some(Box::new(crate::metrics::AstEvaluator::new())),
            linter: Some(Box::new(crate::lint::ExternalLinter::pylint())),
        }
    }

    /// Structural analysis only: no complexity scores, no lint pass.
    pub fn bare() -> Self {
        Self::default()
    }
}

/// Runs the full analysis pipeline over source units.
pub struct Engine {
    capabilities: Capabilities,
}

impl Engine {
    pub fn new(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    /// Analyze one source unit, start to finish.
    ///
    /// Never fails: a parse failure yields the error shell, and external
    /// tool failures degrade the affected fields to absent/empty.
    pub fn analyze(&self, unit: &SourceUnit) -> AnalysisResult {
        let total_lines = unit.total_lines();

        let parsed = match parser::parse(&unit.text) {
            Ok(parsed) => parsed,
            Err(error) => return AnalysisResult::syntax_failure(total_lines, error),
        };
        let root = parsed.root();

        let structure = StructuralVisitor::walk(root);
        let max_nesting = max_nesting_depth(root);

        // Tool failures are swallowed here on purpose: the index stays
        // empty, which downstream reads as "not computed".
        let index = match &self.capabilities.complexity {
            Some(evaluator) => evaluator.evaluate(&unit.text).unwrap_or_default(),
            None => ComplexityIndex::default(),
        };

        let (functions, classes) = details::build(&parsed, &index);

        let suggestions = match (&self.capabilities.linter, &unit.path) {
            (Some(linter), Some(path)) => linter.lint(path).unwrap_or_default(),
            _ => Vec::new(),
        };

        let insights = insights::classify(&structure.frequency, total_lines);

        let average_complexity = index.average();
        let maintainability_index = index.maintainability;
        let quality_score = score::deduction_score(average_complexity, maintainability_index, max_nesting);
        let award_score = score::award_score(average_complexity, maintainability_index, max_nesting);

        AnalysisResult {
            total_lines,
            function_count: structure.function_count,
            class_count: structure.class_count,
            import_count: structure.import_count,
            average_complexity,
            maintainability_index,
            max_nesting_depth: max_nesting,
            functions,
            classes,
            suggestions,
            tracked_nodes: tracked_nodes(&structure.frequency),
            node_frequency: structure.frequency,
            insights,
            quality_score,
            award_score,
            syntax_error: None,
        }
    }
}

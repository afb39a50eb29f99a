//! pygauge - Python source quality analyzer.
//!
//! pygauge parses a Python source unit into a syntax tree and reduces it
//! to structural metrics, per-symbol detail records, qualitative
//! insights, and a bounded quality score.
//!
//! # Architecture
//!
//! - `source`: source unit loading and input validation
//! - `parser`: tree-sitter-python loader, syntax failure records
//! - `analysis`: the engine - structural visitor, nesting analyzer,
//!   detail builder, insight classifier, orchestration
//! - `metrics`: complexity evaluator and maintainability index
//! - `lint`: external linter adapter
//! - `score`: the two quality-scoring schemes
//! - `report`: output formatting (pretty, JSON, HTML report file)
//!
//! Tool availability is explicit: build a [`Capabilities`] and hand it to
//! [`Engine::new`]. An engine with no tools still produces the full
//! structural result with complexity and suggestions absent.

pub mod analysis;
pub mod cli;
pub mod lint;
pub mod metrics;
pub mod parser;
pub mod report;
pub mod score;
pub mod source;

pub use analysis::{
    AnalysisResult, Capabilities, ClassInfo, Engine, FunctionInfo, Suggestion,
    TRACKED_NODE_KINDS,
};
pub use lint::{ExternalLinter, Linter};
pub use metrics::{AstEvaluator, ComplexityEvaluator, ComplexityIndex};
pub use parser::SyntaxErrorInfo;
pub use source::{InputError, SourceUnit};

//! Integration tests for the full analysis pipeline.
//!
//! These run the engine end to end over in-memory sources and the
//! testdata fixtures, checking the documented result-shape guarantees.

use std::path::{Path, PathBuf};

use pygauge::{Capabilities, Engine, SourceUnit};

fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

fn engine_with_complexity() -> Engine {
    Engine::new(Capabilities {
        complexity: Some(Box::new(pygauge::AstEvaluator::new())),
        linter: None,
    })
}

#[test]
fn test_two_line_assignment_scenario() {
    let engine = Engine::new(Capabilities::bare());
    let result = engine.analyze(&SourceUnit::from_source("x = 1\ny = 2\n"));

    assert_eq!(result.total_lines, 2);
    assert_eq!(result.function_count, 0);
    assert_eq!(result.class_count, 0);
    assert_eq!(result.import_count, 0);
    assert_eq!(result.max_nesting_depth, 0);
    assert_eq!(result.quality_score, 100);
}

#[test]
fn test_empty_program_round_trip() {
    let engine = engine_with_complexity();
    let result = engine.analyze(&SourceUnit::from_source(""));

    assert_eq!(result.function_count, 0);
    assert_eq!(result.class_count, 0);
    assert_eq!(result.import_count, 0);
    assert_eq!(result.max_nesting_depth, 0);
    assert!(result.insights.is_empty());
    // Absent complexity and MI of 100 contribute no deduction.
    assert_eq!(result.quality_score, 100);
}

#[test]
fn test_unmatched_parenthesis_yields_error_shell() {
    let unit = SourceUnit::from_file(&testdata("broken.py")).unwrap();
    let result = engine_with_complexity().analyze(&unit);

    let err = result.syntax_error.as_ref().expect("expected syntax error");
    assert!(err.line >= 1);
    assert_eq!(result.function_count, 0);
    assert_eq!(result.class_count, 0);
    assert_eq!(result.import_count, 0);
    assert_eq!(result.max_nesting_depth, 0);
    assert!(result.functions.is_empty());
    assert!(result.node_frequency.is_empty());
    assert!(result.total_lines > 0);
}

#[test]
fn test_counts_equal_record_lengths_on_fixture() {
    let unit = SourceUnit::from_file(&testdata("metrics_heavy.py")).unwrap();
    let result = engine_with_complexity().analyze(&unit);

    assert_eq!(result.function_count, result.functions.len());
    assert_eq!(result.class_count, result.classes.len());
    assert_eq!(result.function_count, 6);
    assert_eq!(result.class_count, 1);
    assert_eq!(result.import_count, 3);

    let inventory = &result.classes[0];
    assert_eq!(inventory.name, "Inventory");
    assert_eq!(inventory.method_count, 3);
}

#[test]
fn test_fixture_records_sorted_and_scored() {
    let unit = SourceUnit::from_file(&testdata("metrics_heavy.py")).unwrap();
    let result = engine_with_complexity().analyze(&unit);

    let lines: Vec<_> = result.functions.iter().map(|f| f.line).collect();
    assert!(lines.windows(2).all(|w| w[0] <= w[1]));

    // Every plainly defined function gets a complexity via exact join.
    for f in &result.functions {
        assert!(
            f.complexity.is_some(),
            "function {} missing complexity",
            f.name
        );
    }
    assert!(result.average_complexity.is_some());
    assert!(result.maintainability_index.is_some());
    assert!((0..=100).contains(&result.quality_score));
    assert!((0..=100).contains(&result.award_score));
}

#[test]
fn test_nesting_depth_on_fixture() {
    let unit = SourceUnit::from_file(&testdata("metrics_heavy.py")).unwrap();
    let result = engine_with_complexity().analyze(&unit);

    // process(): def > with > for > if
    assert_eq!(result.max_nesting_depth, 4);
}

#[test]
fn test_function_span_scenario() {
    let mut source = String::new();
    for i in 1..=9 {
        source.push_str(&format!("pad_{i} = {i}\n"));
    }
    source.push_str("def spanning(a, b, c):\n    x = a\n    y = b\n    z = c\n    return x\n");

    let result = engine_with_complexity().analyze(&SourceUnit::from_source(source));
    let f = result.functions.iter().find(|f| f.name == "spanning").unwrap();
    assert_eq!(f.line, 10);
    assert_eq!(f.end_line, 14);
    assert_eq!(f.loc, 5);
    assert_eq!(f.args.len(), 3);
}

#[test]
fn test_tracked_nodes_always_has_ten_keys() {
    let engine = Engine::new(Capabilities::bare());
    for source in ["", "x = 1\n", "def f():\n    pass\n"] {
        let result = engine.analyze(&SourceUnit::from_source(source));
        assert_eq!(result.tracked_nodes.len(), pygauge::TRACKED_NODE_KINDS.len());
    }
}

#[test]
fn test_loop_insight_threshold_property() {
    let engine = Engine::new(Capabilities::bare());

    // 8 loops over 100 lines: 8 >= 100/25, fires.
    let mut dense = String::new();
    for i in 0..8 {
        dense.push_str(&format!("for i{i} in range(3):\n    pass\n"));
    }
    for i in 0..84 {
        dense.push_str(&format!("filler_{i} = {i}\n"));
    }
    let result = engine.analyze(&SourceUnit::from_source(dense));
    assert_eq!(result.total_lines, 100);
    assert!(result.insights.iter().any(|i| i.contains("Loop-heavy")));

    // 2 loops over 100 lines: 2 < 4, silent.
    let mut sparse = String::new();
    for i in 0..2 {
        sparse.push_str(&format!("for i{i} in range(3):\n    pass\n"));
    }
    for i in 0..96 {
        sparse.push_str(&format!("filler_{i} = {i}\n"));
    }
    let result = engine.analyze(&SourceUnit::from_source(sparse));
    assert_eq!(result.total_lines, 100);
    assert!(!result.insights.iter().any(|i| i.contains("Loop-heavy")));
}

#[test]
fn test_score_weakly_decreases_with_worse_signals() {
    let flat = engine_with_complexity()
        .analyze(&SourceUnit::from_source("def f(x):\n    return x\n"));

    let mut branchy_src = String::from("def f(x):\n");
    for i in 0..12 {
        branchy_src.push_str(&format!("    if x > {i}:\n        x = x - {i}\n"));
    }
    branchy_src.push_str("    return x\n");
    let branchy = engine_with_complexity().analyze(&SourceUnit::from_source(branchy_src));

    assert!(branchy.average_complexity.unwrap() > flat.average_complexity.unwrap());
    assert!(branchy.quality_score <= flat.quality_score);
}

#[test]
fn test_lint_suggestions_via_stub_linter() {
    // `cat` echoes the analyzed file back, so the file doubles as the
    // linter's diagnostic stream.
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("diag.py");
    std::fs::write(
        &path,
        "diag.py:12:4:C0103:bad-name\nnot a diagnostic line\n",
    )
    .unwrap();

    let engine = Engine::new(Capabilities {
        complexity: None,
        linter: Some(Box::new(pygauge::ExternalLinter::new("cat", vec![]))),
    });

    // The file is not valid Python, but lint runs against the path
    // regardless of parse state in this test harness; use a unit whose
    // text is valid and whose path points at the diagnostics.
    let unit = SourceUnit {
        text: "x = 1\n".to_string(),
        path: Some(path),
    };
    let result = engine.analyze(&unit);

    assert_eq!(result.suggestions.len(), 1);
    assert_eq!(result.suggestions[0].line, Some(12));
    assert_eq!(result.suggestions[0].code, "C0103");
    assert_eq!(result.suggestions[0].message, "bad-name");
}

#[test]
fn test_clean_fixture_scores_high() {
    let unit = SourceUnit::from_file(&testdata("clean.py")).unwrap();
    let result = engine_with_complexity().analyze(&unit);

    assert!(result.syntax_error.is_none());
    assert_eq!(result.function_count, 1);
    assert!(result.quality_score >= 90, "score {}", result.quality_score);
}

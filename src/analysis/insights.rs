//! Frequency-ratio insight rules.
//!
//! Each rule compares the count of selected node kinds against the total
//! line count and appends a fixed message when the ratio is high enough.
//! Rules are independent; several may fire on the same unit.

use super::facts::NodeFrequencyTable;

struct Rule {
    kinds: &'static [&'static str],
    /// Rule fires when any single kind's count reaches
    /// `total_lines / factor`; counts are never summed across kinds.
    factor: f64,
    message: &'static str,
}

/// Fixed priority order: conditionals, loops, calls, assignments,
/// attributes, binary ops, try blocks.
const RULES: [Rule; 7] = [
    Rule {
        kinds: &["if_statement"],
        factor: 15.0,
        message: "Dense conditional logic; consider extracting branch-heavy code into helpers",
    },
    Rule {
        kinds: &["for_statement", "while_statement"],
        factor: 25.0,
        message: "Loop-heavy code; look for chances to use builtins or comprehensions",
    },
    Rule {
        kinds: &["call"],
        factor: 12.0,
        message: "High call density; check that functions are cohesive rather than chatty",
    },
    Rule {
        kinds: &["assignment"],
        factor: 20.0,
        message: "Many assignments; some intermediate variables may be unnecessary",
    },
    Rule {
        kinds: &["attribute"],
        factor: 20.0,
        message: "Frequent attribute access; consider caching hot lookups in locals",
    },
    Rule {
        kinds: &["binary_operator"],
        factor: 30.0,
        message: "Expression-heavy code; long operator chains may deserve named helpers",
    },
    Rule {
        kinds: &["try_statement"],
        factor: 40.0,
        message: "Broad exception handling; keep try blocks around only the failing calls",
    },
];

/// Evaluate every rule against the frequency table.
///
/// `total_lines` is floored at 1 so empty input cannot divide by zero.
pub fn classify(frequency: &NodeFrequencyTable, total_lines: usize) -> Vec<String> {
    let lines = total_lines.max(1) as f64;

    RULES
        .iter()
        .filter(|rule| {
            rule.kinds.iter().any(|kind| {
                let count = frequency.get(*kind).copied().unwrap_or(0);
                count as f64 >= lines / rule.factor
            })
        })
        .map(|rule| rule.message.to_string())
        .collect()
}

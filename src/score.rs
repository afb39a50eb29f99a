//! Quality scoring.
//!
//! Two schemes coexist on purpose. [`deduction_score`] starts at 100 and
//! subtracts capped penalties; it is the engine's primary `quality_score`.
//! [`award_score`] accumulates per-metric points toward a capped 100 with
//! its own thresholds. They disagree in direction and cutoffs and are
//! reported side by side, never merged.

/// Deduction caps and weights for the primary scheme.
pub mod penalties {
    /// Per-point multiplier on average complexity.
    pub const COMPLEXITY_WEIGHT: f64 = 5.0;
    /// Cap on the complexity deduction.
    pub const COMPLEXITY_CAP: f64 = 40.0;
    /// Deduction when maintainability is below 50.
    pub const LOW_MAINTAINABILITY: f64 = 25.0;
    /// Deduction when maintainability is in [50, 70).
    pub const MID_MAINTAINABILITY: f64 = 10.0;
    /// Per-level multiplier on nesting depth.
    pub const NESTING_WEIGHT: f64 = 4.0;
    /// Cap on the nesting deduction.
    pub const NESTING_CAP: f64 = 20.0;
}

/// Primary scheme: start at 100, deduct, clamp, truncate.
///
/// Absent complexity or maintainability contributes no deduction; the
/// nesting deduction always applies.
pub fn deduction_score(
    average_complexity: Option<f64>,
    maintainability: Option<f64>,
    max_nesting: usize,
) -> i32 {
    let mut score = 100.0;

    if let Some(avg) = average_complexity {
        score -= (avg * penalties::COMPLEXITY_WEIGHT).min(penalties::COMPLEXITY_CAP);
    }

    if let Some(mi) = maintainability {
        score -= if mi < 50.0 {
            penalties::LOW_MAINTAINABILITY
        } else if mi < 70.0 {
            penalties::MID_MAINTAINABILITY
        } else {
            0.0
        };
    }

    score -= (max_nesting as f64 * penalties::NESTING_WEIGHT).min(penalties::NESTING_CAP);

    score.clamp(0.0, 100.0) as i32
}

/// Alternative scheme: award points per metric, cap the sum at 100.
///
/// Thresholds deliberately differ from the deduction scheme. A missing
/// metric earns its full award, mirroring the primary scheme's "absent
/// means no penalty" stance.
pub fn award_score(
    average_complexity: Option<f64>,
    maintainability: Option<f64>,
    max_nesting: usize,
) -> i32 {
    let complexity_points = match average_complexity {
        None => 40,
        Some(avg) if avg <= 5.0 => 40,
        Some(avg) if avg <= 10.0 => 30,
        Some(avg) if avg <= 20.0 => 15,
        Some(_) => 5,
    };

    let maintainability_points = match maintainability {
        None => 30,
        Some(mi) if mi >= 85.0 => 30,
        Some(mi) if mi >= 65.0 => 20,
        Some(mi) if mi >= 40.0 => 10,
        Some(_) => 0,
    };

    let nesting_points = match max_nesting {
        0..=2 => 30,
        3..=4 => 20,
        5..=6 => 10,
        _ => 0,
    };

    (complexity_points + maintainability_points + nesting_points).min(100)
}

/// Letter grade for a quality score (higher is better).
pub fn grade(score: i32) -> &'static str {
    match score {
        s if s >= 90 => "A",
        s if s >= 75 => "B",
        s if s >= 60 => "C",
        s if s >= 40 => "D",
        _ => "F",
    }
}

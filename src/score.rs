//! Pugh-style score calculation for todos.
//!
//! Converts a todo's raw attributes (priority, value, effort, deadline, age,
//! project weight) into a single comparable score. Pure: no I/O, no mutable
//! state, deterministic given the inputs and the caller-supplied `now`.

use crate::types::Todo;

/// Sentinel score for completed todos. Sorts below any clamped display score.
pub const COMPLETED_SCORE: f64 = -1.0;

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Relative weights for the scored components. The effort weight is applied
/// subtractively: higher cost lowers the score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub priority: f64,
    pub value: f64,
    pub time_required: f64,
    pub deadline: f64,
    pub urgency: f64,
}

/// Calibration constants for the scoring formula.
///
/// These are fixed policy, not user configuration; the struct exists so tests
/// can freeze `now` against a known configuration or vary a single knob.
#[derive(Debug, Clone, Copy)]
pub struct ScoreConfig {
    pub weights: ScoreWeights,
    /// Hours per day realistically available for todo work. Effort at or
    /// beyond one work-day's budget is treated as maximally costly.
    pub hours_per_work_day: f64,
    /// Multiplier that inflates the effort estimate into a deadline safety
    /// buffer, so todos needing more work read as more urgent for the same
    /// calendar deadline.
    pub time_buffer_factor: f64,
    /// Age at which an untouched todo reaches full urgency.
    pub urgency_baseline_days: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights {
                priority: 0.3,
                value: 0.2,
                time_required: 0.2,
                deadline: 0.15,
                urgency: 0.15,
            },
            hours_per_work_day: 2.0,
            time_buffer_factor: 1.5,
            urgency_baseline_days: 14.0,
        }
    }
}

/// Compute the ranking score for a todo at the given instant.
///
/// Completed todos short-circuit to [`COMPLETED_SCORE`]. Out-of-range inputs
/// are not rejected here; range validation belongs to the layers that
/// construct the todo record.
pub fn compute_score(todo: &Todo, now_ms: i64, config: &ScoreConfig) -> f64 {
    if todo.completed {
        return COMPLETED_SCORE;
    }

    let norm_priority = todo.priority / 10.0;
    let norm_value = todo.value / 10.0;
    let norm_time = (todo.time_required / config.hours_per_work_day).min(1.0);

    let deadline = deadline_factor(todo.deadline, todo.time_required, now_ms, config);
    let urgency = urgency_factor(todo.created_at, now_ms, config);

    let weighted = norm_priority * config.weights.priority
        + norm_value * config.weights.value
        - norm_time * config.weights.time_required
        + deadline * config.weights.deadline
        + urgency * config.weights.urgency;

    let project_multiplier = todo.project.as_ref().map(|p| p.weight).unwrap_or(1.0);
    weighted * project_multiplier
}

/// Deadline pressure in [0, 1].
///
/// The effective horizon is the calendar distance to the deadline minus a
/// buffer derived from the effort estimate. The 7- and 30-day breakpoints are
/// hard: the ramp steepens sharply inside a week and flattens to a 0.1 floor
/// past a month.
pub fn deadline_factor(
    deadline_ms: Option<i64>,
    hours_required: f64,
    now_ms: i64,
    config: &ScoreConfig,
) -> f64 {
    let Some(deadline_ms) = deadline_ms else {
        return 0.0;
    };

    let days_until = (deadline_ms - now_ms) as f64 / MS_PER_DAY;
    let buffer_days = hours_required * config.time_buffer_factor / config.hours_per_work_day;
    let effective_days = days_until - buffer_days;

    if effective_days <= 0.0 {
        1.0
    } else if effective_days <= 7.0 {
        1.0 - (effective_days / 7.0).powi(2)
    } else if effective_days <= 30.0 {
        0.5 - (effective_days - 7.0) / 46.0
    } else {
        0.1
    }
}

/// Age-based pressure in [0, 1], independent of any deadline.
///
/// Super-linear in age: a todo twice as old is more than twice as urgent,
/// until the cap at the baseline age.
pub fn urgency_factor(created_at_ms: i64, now_ms: i64, config: &ScoreConfig) -> f64 {
    let age_days = ((now_ms - created_at_ms) as f64 / MS_PER_DAY).max(0.0);
    (age_days / config.urgency_baseline_days).powf(1.5).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Project;

    const NOW: i64 = 1_700_000_000_000;
    const DAY_MS: i64 = 86_400_000;

    fn base_todo() -> Todo {
        Todo {
            id: 1,
            text: "write report".to_string(),
            completed: false,
            category: "work".to_string(),
            priority: 5.0,
            value: 5.0,
            time_required: 1.0,
            deadline: None,
            created_at: NOW,
            project_id: None,
            dependencies: Vec::new(),
            project: None,
            score: None,
        }
    }

    fn cfg() -> ScoreConfig {
        ScoreConfig::default()
    }

    #[test]
    fn completed_todo_scores_sentinel() {
        let mut todo = base_todo();
        todo.completed = true;
        todo.priority = 10.0;
        todo.value = 10.0;
        todo.deadline = Some(NOW);
        assert_eq!(compute_score(&todo, NOW, &cfg()), COMPLETED_SCORE);
    }

    #[test]
    fn score_is_monotone_in_priority_and_value() {
        let mut low = base_todo();
        low.priority = 2.0;
        let mut high = base_todo();
        high.priority = 9.0;
        assert!(compute_score(&high, NOW, &cfg()) > compute_score(&low, NOW, &cfg()));

        let mut low = base_todo();
        low.value = 1.0;
        let mut high = base_todo();
        high.value = 8.0;
        assert!(compute_score(&high, NOW, &cfg()) > compute_score(&low, NOW, &cfg()));
    }

    #[test]
    fn longer_effort_lowers_score_up_to_cap() {
        let mut short = base_todo();
        short.time_required = 0.5;
        let mut long = base_todo();
        long.time_required = 2.0;
        assert!(compute_score(&short, NOW, &cfg()) > compute_score(&long, NOW, &cfg()));

        // Beyond one work-day's budget the penalty is capped.
        let mut capped = base_todo();
        capped.time_required = 2.0;
        let mut way_over = base_todo();
        way_over.time_required = 50.0;
        assert_eq!(
            compute_score(&capped, NOW, &cfg()),
            compute_score(&way_over, NOW, &cfg())
        );
    }

    #[test]
    fn no_deadline_means_zero_pressure() {
        assert_eq!(deadline_factor(None, 1.0, NOW, &cfg()), 0.0);
    }

    #[test]
    fn deadline_at_now_clamps_to_one() {
        assert_eq!(deadline_factor(Some(NOW), 1.0, NOW, &cfg()), 1.0);
        // Overdue deadlines clamp too, never exceeding 1.
        assert_eq!(deadline_factor(Some(NOW - 10 * DAY_MS), 1.0, NOW, &cfg()), 1.0);
    }

    #[test]
    fn buffer_consumes_calendar_headroom() {
        // One calendar day of headroom, but 4 hours of work carries
        // (4 * 1.5) / 2 = 3 days of buffer, leaving the deadline missed.
        assert_eq!(deadline_factor(Some(NOW + DAY_MS), 4.0, NOW, &cfg()), 1.0);
    }

    #[test]
    fn week_out_ramp_is_quadratic() {
        // Zero effort keeps the buffer out of the way: 3.5 effective days.
        let f = deadline_factor(Some(NOW + 7 * DAY_MS / 2), 0.0, NOW, &cfg());
        assert!((f - 0.75).abs() < 1e-9);

        // At exactly 7 effective days the ramp bottoms out at 0.
        let f = deadline_factor(Some(NOW + 7 * DAY_MS), 0.0, NOW, &cfg());
        assert!(f.abs() < 1e-9);
    }

    #[test]
    fn mid_range_decays_linearly() {
        let f = deadline_factor(Some(NOW + 10 * DAY_MS), 0.0, NOW, &cfg());
        assert!((f - (0.5 - 3.0 / 46.0)).abs() < 1e-9);

        let f = deadline_factor(Some(NOW + 30 * DAY_MS), 0.0, NOW, &cfg());
        assert!(f.abs() < 1e-9);
    }

    #[test]
    fn far_future_sits_on_the_floor() {
        let f = deadline_factor(Some(NOW + 90 * DAY_MS), 0.0, NOW, &cfg());
        assert_eq!(f, 0.1);
    }

    #[test]
    fn imminent_deadline_beats_no_deadline() {
        let mut dated = base_todo();
        dated.deadline = Some(NOW + DAY_MS);
        let undated = base_todo();
        assert!(compute_score(&dated, NOW, &cfg()) > compute_score(&undated, NOW, &cfg()));
    }

    #[test]
    fn urgency_starts_at_zero_and_caps_at_one() {
        assert_eq!(urgency_factor(NOW, NOW, &cfg()), 0.0);
        assert_eq!(urgency_factor(NOW - 14 * DAY_MS, NOW, &cfg()), 1.0);
        assert_eq!(urgency_factor(NOW - 60 * DAY_MS, NOW, &cfg()), 1.0);
        // A created_at in the future still yields a number, not NaN.
        assert_eq!(urgency_factor(NOW + DAY_MS, NOW, &cfg()), 0.0);
    }

    #[test]
    fn urgency_grows_superlinearly_with_age() {
        let young = urgency_factor(NOW - 7 * DAY_MS / 2, NOW, &cfg());
        let old = urgency_factor(NOW - 7 * DAY_MS, NOW, &cfg());
        assert!(old > 2.0 * young);
    }

    #[test]
    fn weighted_combination_matches_constants() {
        // priority 10, value 10, time at the cap, no deadline, age 0:
        // 1.0*0.3 + 1.0*0.2 - 1.0*0.2 + 0 + 0 = 0.3
        let mut todo = base_todo();
        todo.priority = 10.0;
        todo.value = 10.0;
        todo.time_required = 2.0;
        let score = compute_score(&todo, NOW, &cfg());
        assert!((score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn project_weight_scales_score_exactly() {
        let project = |weight| Project {
            id: 1,
            name: "alpha".to_string(),
            description: None,
            category_id: None,
            weight,
        };

        let mut single = base_todo();
        single.project = Some(project(1.0));
        let mut double = base_todo();
        double.project = Some(project(2.0));

        let base = compute_score(&single, NOW, &cfg());
        assert!(base > 0.0);
        assert!((compute_score(&double, NOW, &cfg()) - 2.0 * base).abs() < 1e-9);
    }

    #[test]
    fn missing_project_defaults_to_unit_weight() {
        let mut with_unit = base_todo();
        with_unit.project = Some(Project {
            id: 1,
            name: "alpha".to_string(),
            description: None,
            category_id: None,
            weight: 1.0,
        });
        let without = base_todo();
        assert_eq!(
            compute_score(&with_unit, NOW, &cfg()),
            compute_score(&without, NOW, &cfg())
        );
    }

    #[test]
    fn out_of_range_inputs_still_produce_a_number() {
        let mut todo = base_todo();
        todo.priority = 40.0;
        todo.value = -3.0;
        todo.time_required = 0.0;
        let score = compute_score(&todo, NOW, &cfg());
        assert!(score.is_finite());
    }
}

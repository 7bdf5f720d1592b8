//! Ordering policy for ranked todo lists.
//!
//! Operates on scored, non-completed todos. The list is split into two tiers:
//! todos with no recorded dependencies, then todos blocked by at least one
//! dependency id. The tiers never interleave; "can start it but it's
//! low-value" sorts ahead of "can't start it yet" no matter what the numbers
//! say.

use crate::score::{ScoreConfig, compute_score};
use crate::types::Todo;
use std::cmp::Ordering;

/// Score every todo against a single `now` snapshot, clamp for display, and
/// order the list.
///
/// Raw scores below zero are clamped to 0 before ordering, so low scorers tie
/// at 0 and keep their load order under the stable sort.
pub fn rank_todos(
    mut todos: Vec<Todo>,
    now_ms: i64,
    config: &ScoreConfig,
    sort_by_score: bool,
) -> Vec<Todo> {
    for todo in &mut todos {
        todo.score = Some(compute_score(todo, now_ms, config).max(0.0));
    }
    order_todos(todos, sort_by_score)
}

/// Arrange already-scored todos: independent first, blocked always last.
///
/// The independent tier is sorted by score descending only when
/// `sort_by_score` is set; otherwise it keeps its incoming order. The blocked
/// tier is always sorted, by dependency count descending (heaviest unlock
/// requirements surface first) and then by score descending. A todo counts as
/// blocked whenever it records any dependency ids, regardless of whether the
/// referenced todos are themselves complete.
pub fn order_todos(todos: Vec<Todo>, sort_by_score: bool) -> Vec<Todo> {
    let (mut independent, mut blocked): (Vec<Todo>, Vec<Todo>) = todos
        .into_iter()
        .partition(|todo| todo.dependencies.is_empty());

    if sort_by_score {
        independent.sort_by(|a, b| cmp_score_desc(a, b));
    }

    blocked.sort_by(|a, b| {
        b.dependencies
            .len()
            .cmp(&a.dependencies.len())
            .then_with(|| cmp_score_desc(a, b))
    });

    independent.extend(blocked);
    independent
}

fn cmp_score_desc(a: &Todo, b: &Todo) -> Ordering {
    let (a, b) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;
    const DAY_MS: i64 = 86_400_000;

    fn todo(id: i64, score: f64, dependencies: Vec<i64>) -> Todo {
        Todo {
            id,
            text: format!("todo {id}"),
            completed: false,
            category: "general".to_string(),
            priority: 5.0,
            value: 5.0,
            time_required: 1.0,
            deadline: None,
            created_at: NOW,
            project_id: None,
            dependencies,
            project: None,
            score: Some(score),
        }
    }

    fn ids(todos: &[Todo]) -> Vec<i64> {
        todos.iter().map(|t| t.id).collect()
    }

    #[test]
    fn blocked_never_precedes_independent() {
        let ordered = order_todos(
            vec![todo(1, 9.9, vec![2]), todo(2, 0.1, vec![])],
            true,
        );
        assert_eq!(ids(&ordered), vec![2, 1]);
    }

    #[test]
    fn independent_sorted_by_score_descending() {
        let ordered = order_todos(
            vec![todo(1, 0.2, vec![]), todo(2, 0.9, vec![]), todo(3, 0.5, vec![])],
            true,
        );
        assert_eq!(ids(&ordered), vec![2, 3, 1]);
    }

    #[test]
    fn load_order_mode_leaves_independent_untouched() {
        let ordered = order_todos(
            vec![todo(1, 0.2, vec![]), todo(2, 0.9, vec![]), todo(3, 0.5, vec![])],
            false,
        );
        assert_eq!(ids(&ordered), vec![1, 2, 3]);
    }

    #[test]
    fn blocked_sorted_even_in_load_order_mode() {
        let ordered = order_todos(
            vec![
                todo(1, 0.1, vec![]),
                todo(2, 0.3, vec![5]),
                todo(3, 0.9, vec![5, 6]),
            ],
            false,
        );
        assert_eq!(ids(&ordered), vec![1, 3, 2]);
    }

    #[test]
    fn heavier_dependency_count_surfaces_first() {
        let ordered = order_todos(
            vec![
                todo(1, 9.0, vec![7]),
                todo(2, 0.1, vec![7, 8, 9]),
                todo(3, 5.0, vec![7, 8]),
            ],
            true,
        );
        assert_eq!(ids(&ordered), vec![2, 3, 1]);
    }

    #[test]
    fn equal_dependency_counts_fall_back_to_score() {
        let ordered = order_todos(
            vec![todo(1, 0.2, vec![7, 8]), todo(2, 0.8, vec![5, 6])],
            true,
        );
        assert_eq!(ids(&ordered), vec![2, 1]);
    }

    #[test]
    fn clamped_ties_keep_load_order() {
        // Both raw scores clamp to 0, so neither outranks the other.
        let mut a = todo(1, 0.0, vec![]);
        a.priority = 0.0;
        a.value = 0.0;
        a.time_required = 5.0;
        let mut b = todo(2, 0.0, vec![]);
        b.priority = 0.0;
        b.value = 1.0;
        b.time_required = 5.0;

        let ordered = rank_todos(vec![a, b], NOW, &ScoreConfig::default(), true);
        assert_eq!(ids(&ordered), vec![1, 2]);
        assert_eq!(ordered[0].score, Some(0.0));
        assert_eq!(ordered[1].score, Some(0.0));
    }

    #[test]
    fn rank_attaches_nonnegative_scores() {
        let mut sunk = todo(1, 0.0, vec![]);
        sunk.priority = 0.0;
        sunk.value = 0.0;
        sunk.time_required = 10.0;

        let ranked = rank_todos(vec![sunk], NOW, &ScoreConfig::default(), true);
        assert_eq!(ranked[0].score, Some(0.0));
    }

    #[test]
    fn high_scorer_precedes_low_scorer() {
        let mut a = todo(1, 0.0, vec![]);
        a.priority = 10.0;
        a.value = 10.0;
        a.created_at = NOW - 7 * DAY_MS;
        let mut b = todo(2, 0.0, vec![]);
        b.priority = 1.0;
        b.value = 1.0;
        b.created_at = NOW - 7 * DAY_MS;

        let ranked = rank_todos(vec![b, a], NOW, &ScoreConfig::default(), true);
        assert_eq!(ids(&ranked), vec![1, 2]);
        assert!(ranked[0].score.unwrap() > ranked[1].score.unwrap());
    }

    #[test]
    fn dependent_goes_last_however_high_its_score() {
        let mut a = todo(1, 0.0, vec![]);
        a.priority = 10.0;
        a.value = 10.0;
        let mut b = todo(2, 0.0, vec![]);
        b.priority = 1.0;
        b.value = 1.0;
        let mut c = todo(3, 0.0, vec![2]);
        c.priority = 10.0;
        c.value = 10.0;

        let ranked = rank_todos(vec![a, b, c], NOW, &ScoreConfig::default(), true);
        assert_eq!(ids(&ranked), vec![1, 2, 3]);
    }
}

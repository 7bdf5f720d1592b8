//! Plain-text rendering for todo lists.

use crate::types::Todo;
use chrono::{Local, TimeZone};

/// Format an effort estimate: minutes under an hour, whole hours otherwise.
pub fn format_hours(hours: f64) -> String {
    if hours <= 0.0 {
        return "1h".to_string();
    }
    if hours >= 1.0 {
        format!("{}h", hours.round() as i64)
    } else {
        format!("{}m", (hours * 60.0).round() as i64)
    }
}

/// Format a deadline relative to `now`: "Today", "Tomorrow", or a date.
pub fn format_deadline(deadline_ms: Option<i64>, now_ms: i64) -> String {
    let Some(deadline_ms) = deadline_ms else {
        return "-".to_string();
    };

    let Some(deadline) = Local.timestamp_millis_opt(deadline_ms).single() else {
        return "-".to_string();
    };
    let Some(now) = Local.timestamp_millis_opt(now_ms).single() else {
        return "-".to_string();
    };

    let deadline_date = deadline.date_naive();
    let today = now.date_naive();

    if deadline_date == today {
        "Today".to_string()
    } else if deadline_date == today.succ_opt().unwrap_or(today) {
        "Tomorrow".to_string()
    } else {
        deadline_date.format("%Y-%m-%d").to_string()
    }
}

/// Trim trailing zeros off user-entered numbers: 5 stays "5", 5.5 stays "5.5".
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{:.1}", n)
    }
}

fn format_deps(deps: &[i64]) -> String {
    if deps.is_empty() {
        "-".to_string()
    } else {
        format!(
            "#{}",
            deps.iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}

/// Render a ranked todo list as an aligned text table.
pub fn render_todo_table(todos: &[Todo], now_ms: i64) -> String {
    let headers = ["ID", "P/T/V", "Score", "Project", "Deadline", "Deps", "Task"];

    let rows: Vec<[String; 7]> = todos
        .iter()
        .map(|todo| {
            [
                todo.id.to_string(),
                format!(
                    "{}/{}/{}",
                    format_number(todo.priority),
                    format_hours(todo.time_required),
                    format_number(todo.value)
                ),
                format!("{:.2}", todo.score.unwrap_or(0.0)),
                todo.project
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "-".to_string()),
                format_deadline(todo.deadline, now_ms),
                format_deps(&todo.dependencies),
                todo.text.clone(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&render_row(&header_cells));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');

    for row in &rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;
    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn hours_render_as_minutes_below_one() {
        assert_eq!(format_hours(0.5), "30m");
        assert_eq!(format_hours(2.0), "2h");
        assert_eq!(format_hours(2.4), "2h");
        assert_eq!(format_hours(0.0), "1h");
    }

    #[test]
    fn deadline_names_today_and_tomorrow() {
        assert_eq!(format_deadline(None, NOW), "-");
        assert_eq!(format_deadline(Some(NOW), NOW), "Today");
        assert_eq!(format_deadline(Some(NOW + DAY_MS), NOW), "Tomorrow");
        // A week out renders as a concrete date.
        let far = format_deadline(Some(NOW + 7 * DAY_MS), NOW);
        assert!(far.contains('-') && far.len() == 10, "got {far}");
    }

    #[test]
    fn table_includes_all_columns() {
        let todo = Todo {
            id: 3,
            text: "water the plants".to_string(),
            completed: false,
            category: "home".to_string(),
            priority: 5.0,
            value: 7.5,
            time_required: 0.5,
            deadline: None,
            created_at: NOW,
            project_id: None,
            dependencies: vec![1, 2],
            project: None,
            score: Some(0.42),
        };

        let table = render_todo_table(&[todo], NOW);
        assert!(table.contains("5/30m/7.5"));
        assert!(table.contains("0.42"));
        assert!(table.contains("#1,2"));
        assert!(table.contains("water the plants"));
    }
}

//! Core domain types for the ranked todo manager.

use serde::{Deserialize, Deserializer, Serialize};

/// A todo item with its resolved associations.
///
/// `score` and `project` are derived at view time: `score` is attached right
/// before ordering and never persisted, `project` is joined in from the
/// projects table when lists are assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub category: String,
    /// User-assigned importance in [0, 10].
    pub priority: f64,
    /// User-assigned payoff in [0, 10].
    pub value: f64,
    /// Estimated effort in hours. Always positive.
    pub time_required: f64,
    /// Deadline in epoch milliseconds; absent means no deadline pressure.
    pub deadline: Option<i64>,
    pub created_at: i64,
    pub project_id: Option<i64>,
    /// Ids of todos that must complete before this one is actionable.
    #[serde(default)]
    pub dependencies: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// A named category with a display weight in [0, 5].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub weight: f64,
}

/// A project grouping todos; its weight multiplies member scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    /// Positive score multiplier applied to member todos.
    pub weight: f64,
}

/// Input for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Input for creating a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoInput {
    pub text: String,
    pub category: String,
    pub priority: f64,
    pub value: f64,
    #[serde(default = "default_time_required")]
    pub time_required: f64,
    pub deadline: Option<i64>,
    pub project_id: Option<i64>,
    #[serde(default)]
    pub dependencies: Vec<i64>,
}

fn default_time_required() -> f64 {
    1.0
}

/// Partial update for a todo. `None` leaves a field untouched; for nullable
/// columns `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub text: Option<String>,
    pub category: Option<String>,
    pub priority: Option<f64>,
    pub value: Option<f64>,
    pub time_required: Option<f64>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<Option<i64>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<Option<i64>>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.value.is_none()
            && self.time_required.is_none()
            && self.deadline.is_none()
            && self.project_id.is_none()
    }
}

/// Distinguishes an absent field (outer `None`) from an explicit null
/// (`Some(None)`) when deserializing partial updates.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_update_distinguishes_missing_from_null() {
        let untouched: TodoUpdate = serde_json::from_str(r#"{"text": "x"}"#).unwrap();
        assert_eq!(untouched.deadline, None);

        let cleared: TodoUpdate = serde_json::from_str(r#"{"deadline": null}"#).unwrap();
        assert_eq!(cleared.deadline, Some(None));

        let set: TodoUpdate = serde_json::from_str(r#"{"deadline": 1700000000000}"#).unwrap();
        assert_eq!(set.deadline, Some(Some(1_700_000_000_000)));
    }

    #[test]
    fn todo_input_defaults_time_required() {
        let input: TodoInput = serde_json::from_str(
            r#"{"text": "t", "category": "c", "priority": 5, "value": 5}"#,
        )
        .unwrap();
        assert_eq!(input.time_required, 1.0);
        assert!(input.dependencies.is_empty());
    }
}

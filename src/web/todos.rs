//! Todo endpoints.

use super::server::ApiServer;
use crate::db::now_ms;
use crate::error::{ApiError, ApiResult};
use crate::rank::rank_todos;
use crate::types::{Todo, TodoInput, TodoUpdate};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    /// "score" (default) or "id".
    pub sort: Option<String>,
}

/// List open todos, ranked. A single clock reading covers every score in the
/// response so deadline and urgency comparisons stay coherent.
pub async fn list(
    State(state): State<ApiServer>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.db().list_active(query.category.as_deref())?;
    let sort_by_score = query.sort.as_deref() != Some("id");
    let ranked = rank_todos(todos, now_ms(), state.score_config(), sort_by_score);
    Ok(Json(ranked))
}

pub async fn get_one(
    State(state): State<ApiServer>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Todo>> {
    let todo = state
        .db()
        .get_todo(id)?
        .ok_or_else(|| ApiError::todo_not_found(id))?;
    Ok(Json(todo))
}

pub async fn create(
    State(state): State<ApiServer>,
    Json(input): Json<TodoInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = state.db().create_todo(&input)?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update(
    State(state): State<ApiServer>,
    Path(id): Path<i64>,
    Json(update): Json<TodoUpdate>,
) -> ApiResult<Json<Value>> {
    if !state.db().update_todo(id, &update)? {
        return Err(ApiError::todo_not_found(id));
    }
    Ok(Json(json!({ "success": true })))
}

/// A JSON-Patch style operation. Only `replace` is supported.
#[derive(Debug, Deserialize)]
pub struct PatchOperation {
    pub op: String,
    pub path: String,
    #[serde(default)]
    pub value: Value,
}

pub async fn patch(
    State(state): State<ApiServer>,
    Path(id): Path<i64>,
    Json(operations): Json<Vec<PatchOperation>>,
) -> ApiResult<Json<Value>> {
    if state.db().get_todo(id)?.is_none() {
        return Err(ApiError::todo_not_found(id));
    }

    for op in &operations {
        if op.op != "replace" || !op.path.starts_with('/') {
            return Err(ApiError::unsupported("Only replace operations are supported"));
        }

        let mut update = TodoUpdate::default();
        match op.path.trim_start_matches('/') {
            "completed" => {
                let Some(done) = op.value.as_bool() else {
                    return Err(ApiError::invalid_value(
                        "completed",
                        "Completed value must be a boolean",
                    ));
                };
                if done {
                    state.db().complete_todo(id)?;
                }
                continue;
            }
            "text" => update.text = Some(string_value(op, "text")?),
            "category" => update.category = Some(string_value(op, "category")?),
            "priority" => update.priority = Some(number_value(op, "priority")?),
            "value" => update.value = Some(number_value(op, "value")?),
            "time_required" => update.time_required = Some(number_value(op, "time_required")?),
            "deadline" => update.deadline = Some(op.value.as_i64()),
            _ => {
                return Err(ApiError::unsupported(format!("Invalid path: {}", op.path)));
            }
        }
        state.db().update_todo(id, &update)?;
    }

    Ok(Json(json!({ "success": true })))
}

fn string_value(op: &PatchOperation, field: &str) -> ApiResult<String> {
    op.value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ApiError::invalid_value(field, format!("{} must be a string", field)))
}

fn number_value(op: &PatchOperation, field: &str) -> ApiResult<f64> {
    op.value
        .as_f64()
        .ok_or_else(|| ApiError::invalid_value(field, format!("{} must be a number", field)))
}

pub async fn remove(
    State(state): State<ApiServer>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    if !state.db().delete_todo(id)? {
        return Err(ApiError::todo_not_found(id));
    }
    Ok(Json(json!({ "success": true })))
}

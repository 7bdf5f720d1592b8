//! Project endpoints.

use super::server::ApiServer;
use crate::error::{ApiError, ApiResult};
use crate::types::{Project, ProjectInput};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

pub async fn list(State(state): State<ApiServer>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.db().list_projects()?))
}

pub async fn create(
    State(state): State<ApiServer>,
    Json(input): Json<ProjectInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = state.db().create_project(&input)?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update(
    State(state): State<ApiServer>,
    Path(id): Path<i64>,
    Json(input): Json<ProjectInput>,
) -> ApiResult<Json<Value>> {
    if !state.db().update_project(id, &input)? {
        return Err(ApiError::project_not_found(id));
    }
    Ok(Json(json!({ "success": true })))
}

pub async fn remove(
    State(state): State<ApiServer>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    if !state.db().delete_project(id)? {
        return Err(ApiError::project_not_found(id));
    }
    Ok(Json(json!({ "success": true })))
}

//! Category endpoints.

use super::server::ApiServer;
use crate::error::{ApiError, ApiResult};
use crate::types::Category;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

pub async fn list(State(state): State<ApiServer>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db().list_categories()?))
}

pub async fn get_one(
    State(state): State<ApiServer>,
    Path(name): Path<String>,
) -> ApiResult<Json<Category>> {
    let category = state
        .db()
        .get_category(&name)?
        .ok_or_else(|| ApiError::category_not_found(&name))?;
    Ok(Json(category))
}

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub weight: f64,
}

pub async fn create(
    State(state): State<ApiServer>,
    Json(body): Json<CreateCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.db().create_category(&body.name, body.weight)?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub weight: Option<f64>,
}

pub async fn update(
    State(state): State<ApiServer>,
    Path(name): Path<String>,
    Json(body): Json<UpdateCategory>,
) -> ApiResult<Json<Value>> {
    if !state
        .db()
        .update_category(&name, body.name.as_deref(), body.weight)?
    {
        return Err(ApiError::category_not_found(&name));
    }
    Ok(Json(json!({ "success": true })))
}

pub async fn remove(
    State(state): State<ApiServer>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    if !state.db().delete_category(&name)? {
        return Err(ApiError::category_not_found(&name));
    }
    Ok(Json(json!({ "success": true })))
}

//! HTTP JSON API module.
//!
//! Serves the same operations as the CLI over REST, plus a health probe.

mod categories;
mod projects;
mod server;
mod todos;

pub use server::{ApiServer, build_router, start_server};

use crate::error::{ApiError, ErrorCode};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.code {
            ErrorCode::TodoNotFound
            | ErrorCode::CategoryNotFound
            | ErrorCode::ProjectNotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists | ErrorCode::CategoryInUse => StatusCode::CONFLICT,
            ErrorCode::InvalidFieldValue
            | ErrorCode::UnsupportedOperation
            | ErrorCode::DependencyNotFound => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(self)).into_response()
    }
}

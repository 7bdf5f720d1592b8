//! Structured error types shared by the CLI and HTTP layers.

use serde::Serialize;
use std::fmt;

/// Machine-readable error codes, serialized into API error bodies.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    InvalidFieldValue,
    UnsupportedOperation,

    // Not found errors
    TodoNotFound,
    CategoryNotFound,
    ProjectNotFound,
    DependencyNotFound,

    // Conflict errors
    AlreadyExists,
    CategoryInUse,

    // Internal errors
    DatabaseError,
    InternalError,
}

/// Structured error carried through service and transport boundaries.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // Convenience constructors

    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFieldValue, reason).with_field(field)
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedOperation, reason)
    }

    pub fn todo_not_found(id: i64) -> Self {
        Self::new(ErrorCode::TodoNotFound, format!("Todo #{} not found", id))
    }

    pub fn category_not_found(name: &str) -> Self {
        Self::new(
            ErrorCode::CategoryNotFound,
            format!("Category '{}' not found", name),
        )
    }

    pub fn project_not_found(id: i64) -> Self {
        Self::new(
            ErrorCode::ProjectNotFound,
            format!("Project #{} not found", id),
        )
    }

    pub fn dependency_not_found(id: i64) -> Self {
        Self::new(
            ErrorCode::DependencyNotFound,
            format!("Dependency todo #{} not found", id),
        )
    }

    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExists, what)
    }

    pub fn category_in_use(name: &str, todo_count: i64) -> Self {
        Self::new(
            ErrorCode::CategoryInUse,
            format!(
                "Cannot delete category '{}' because it has {} todo(s)",
                name, todo_count
            ),
        )
    }

    pub fn database(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

// Recover the structured error when one crossed an anyhow boundary.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => ApiError::internal(err),
        }
    }
}

/// Result type for service operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

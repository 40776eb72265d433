use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy of the task operations.
///
/// `NotFound` covers nonexistent, foreign-owned, and already-soft-deleted
/// targets uniformly: the lookup set is narrowed per caller before the id is
/// resolved, so an unauthorized caller cannot learn whether a record exists
/// under a different owner.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found.")]
    NotFound,

    #[error("Task is already completed.")]
    AlreadyCompleted,

    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),
}

impl From<redb::TransactionError> for TaskError {
    fn from(e: redb::TransactionError) -> Self {
        TaskError::Storage(e.into())
    }
}

impl From<redb::TableError> for TaskError {
    fn from(e: redb::TableError) -> Self {
        TaskError::Storage(e.into())
    }
}

impl From<redb::StorageError> for TaskError {
    fn from(e: redb::StorageError) -> Self {
        TaskError::Storage(e.into())
    }
}

impl From<redb::CommitError> for TaskError {
    fn from(e: redb::CommitError) -> Self {
        TaskError::Storage(e.into())
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            TaskError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.to_string() }),
            ),
            TaskError::AlreadyCompleted => (
                StatusCode::BAD_REQUEST,
                json!({ "message": self.to_string() }),
            ),
            TaskError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            TaskError::Storage(e) => {
                tracing::error!(error = %e, "task storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Storage error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

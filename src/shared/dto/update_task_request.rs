use serde::Deserialize;

/// Fields a caller may change on an existing task. Deliberately carries no
/// `owner` or `is_deleted` field: both are read-only through the API, so a
/// payload that supplies them is accepted and the values ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub is_completed: Option<bool>,
}

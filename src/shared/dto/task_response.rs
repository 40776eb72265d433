use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::Task;

/// The serialized form of a task. `owner` is exposed as the owning user's
/// id only; `owner` and `is_deleted` are read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub is_completed: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: Uuid,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        TaskResponse {
            id: task.id,
            title: task.title,
            is_completed: task.is_completed,
            is_deleted: task.is_deleted,
            created_at: task.created_at,
            updated_at: task.updated_at,
            owner: task.owner,
        }
    }
}

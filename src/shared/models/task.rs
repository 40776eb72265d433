use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do item. `owner` is fixed at creation and `is_deleted` only ever
/// moves from false to true (soft delete is the sole deletion path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub is_completed: bool,
    pub is_deleted: bool,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: String, owner: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            is_completed: false,
            is_deleted: false,
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

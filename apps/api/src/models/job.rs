use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Owning user; jobs cascade-delete with their owner.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

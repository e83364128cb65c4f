use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoverLetterRow {
    pub id: i64,
    pub user_id: i64,
    pub job_id: i64,
    pub resume_id: i64,
    /// Markdown cover letter text as returned by the LLM.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted outcome of a résumé-to-job match. One row per (resume, job)
/// pair; re-running the match updates the score in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobMatchRow {
    pub id: i64,
    pub resume_id: i64,
    pub job_id: i64,
    pub match_score: f64,
    pub created_at: DateTime<Utc>,
}

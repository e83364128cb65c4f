//! Axum route handlers for the Cover Letters API.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::llm::{tasks, ModelOverride};
use crate::models::cover_letter::CoverLetterRow;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::state::AppState;

/// POST /api/v1/cover-letters/:user_id/:job_id/generate
///
/// Generates a cover letter from the latest résumé linked to (user, job) and
/// persists it as a `cover_letters` row.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Path((user_id, job_id)): Path<(i64, i64)>,
    Query(overrides): Query<ModelOverride>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let latest_resume = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 AND job_id = $2 ORDER BY id DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(job_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("No resume linked to this job".to_string()))?;

    let experience = latest_resume.effective_experience().ok_or_else(|| {
        AppError::UnprocessableEntity(format!(
            "Resume {} has no experience text",
            latest_resume.id
        ))
    })?;

    let content =
        tasks::generate_cover_letter(&state.llm, &job.description, experience, &overrides).await?;

    let letter = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters (user_id, job_id, resume_id, content)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(job_id)
    .bind(latest_resume.id)
    .bind(&content)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(letter))
}

//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::llm::{tasks, ModelOverride};
use crate::models::job::JobRow;
use crate::models::job_match::JobMatchRow;
use crate::models::resume::ResumeRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub resume_id: i64,
    pub job_id: i64,
    pub match_percentage: f64,
}

/// GET /api/v1/job-match/:resume_id/match/:job_id
///
/// Scores the résumé against the job's stored embedding and upserts the
/// result into `job_matches`. The engine's typed errors map to responses in
/// `From<MatchError>`: unknown job or missing embedding → 404, model-service
/// failures → 502.
pub async fn handle_match(
    State(state): State<AppState>,
    Path((resume_id, job_id)): Path<(i64, i64)>,
) -> Result<Json<MatchResponse>, AppError> {
    let resume = fetch_resume(&state, resume_id).await?;
    let text = resume.effective_experience().ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Resume {resume_id} has no experience text"))
    })?;

    let match_percentage = state.engine.match_resume_to_job(text, job_id).await?;

    // The subsystem treats the result as ephemeral; persisting it here is the
    // calling layer's choice. Re-running a match refreshes the stored score.
    let row = sqlx::query_as::<_, JobMatchRow>(
        r#"
        INSERT INTO job_matches (resume_id, job_id, match_score)
        VALUES ($1, $2, $3)
        ON CONFLICT (resume_id, job_id) DO UPDATE SET match_score = EXCLUDED.match_score
        RETURNING *
        "#,
    )
    .bind(resume_id)
    .bind(job_id)
    .bind(match_percentage)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(MatchResponse {
        resume_id: row.resume_id,
        job_id: row.job_id,
        match_percentage: row.match_score,
    }))
}

/// POST /api/v1/job-match/:resume_id/optimize/:job_id
///
/// Rewrites the résumé to target the job and saves the result as a new résumé
/// linked to the job and the parent résumé.
pub async fn handle_optimize_for_job(
    State(state): State<AppState>,
    Path((resume_id, job_id)): Path<(i64, i64)>,
    Query(overrides): Query<ModelOverride>,
) -> Result<Json<ResumeRow>, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let parent = fetch_resume(&state, resume_id).await?;
    let experience = parent.experience.as_deref().ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Resume {resume_id} has no experience text"))
    })?;

    let improved =
        tasks::optimize_resume_for_job(&state.llm, experience, &job.description, &overrides)
            .await?;

    let optimized = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (name, email, user_id, job_id, parent_resume_id, experience, improved_experience)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING *
        "#,
    )
    .bind(&parent.name)
    .bind(optimized_email(&parent.email, job_id))
    .bind(job.user_id)
    .bind(job_id)
    .bind(parent.id)
    .bind(&improved)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(optimized))
}

/// Job-targeted copies get a derived address so the unique-email constraint
/// keeps holding across repeated optimizations.
fn optimized_email(parent_email: &str, job_id: i64) -> String {
    match parent_email.split_once('@') {
        Some((local, domain)) => format!("{local}+job{job_id}@{domain}"),
        None => format!("{parent_email}+job{job_id}"),
    }
}

async fn fetch_resume(state: &AppState, resume_id: i64) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimized_email_tags_local_part() {
        assert_eq!(
            optimized_email("ada@example.com", 42),
            "ada+job42@example.com"
        );
    }

    #[test]
    fn test_optimized_email_without_at_sign() {
        assert_eq!(optimized_email("ada", 7), "ada+job7");
    }
}

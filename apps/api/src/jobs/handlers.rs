//! Axum route handlers for the Jobs API.
//!
//! Creating a job also feeds its description into the matching engine's
//! embedding store. That storage is a best-effort side channel: the engine
//! logs failures internally and the job-creation response does not depend on
//! it.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub user_id: i64,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    if request.title.trim().is_empty() || request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "title and description are required".to_string(),
        ));
    }

    let owner: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
        .bind(request.user_id)
        .fetch_optional(&state.db)
        .await?;
    if owner.is_none() {
        return Err(AppError::NotFound(format!(
            "User with ID {} not found",
            request.user_id
        )));
    }

    let job = sqlx::query_as::<_, JobRow>(
        "INSERT INTO jobs (title, description, user_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&request.title)
    .bind(&request.description)
    .bind(request.user_id)
    .fetch_one(&state.db)
    .await?;

    // Best-effort: a failed embedding never fails job creation.
    state.engine.store_job(&job.description, job.id).await;

    Ok(Json(job))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY id")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<JobRow>, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    Ok(Json(job))
}

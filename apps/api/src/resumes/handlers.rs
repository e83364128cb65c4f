//! Axum route handlers for the Résumés API: CRUD, PDF upload, and the
//! LLM-backed improve/cover-letter endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm::{tasks, ModelOverride};
use crate::models::resume::ResumeRow;
use crate::resumes::pdf::extract_resume_text;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResumeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub improved_experience: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeCoverLetterRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterTextResponse {
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::Validation(
            "name and email are required".to_string(),
        ));
    }

    ensure_email_free(&state, &request.email).await?;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (name, email, phone, linkedin_url, skills, experience, education)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&request.linkedin_url)
    .bind(&request.skills)
    .bind(&request.experience)
    .bind(&request.education)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(resume))
}

/// POST /api/v1/resumes/upload
///
/// Multipart upload: `name`, `email`, and a `file` PDF. The extracted text
/// lands in both `parsed_text` and `experience` so matching works on uploads
/// without further editing.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeRow>, AppError> {
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut file: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => {
                name = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable 'name' field: {e}"))
                })?)
            }
            Some("email") => {
                email = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable 'email' field: {e}"))
                })?)
            }
            Some("file") => {
                file = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable 'file' field: {e}"))
                })?)
            }
            _ => {}
        }
    }

    let name = name.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
        AppError::Validation("Multipart field 'name' is required".to_string())
    })?;
    let email = email.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
        AppError::Validation("Multipart field 'email' is required".to_string())
    })?;
    let file = file.ok_or_else(|| {
        AppError::Validation("Multipart field 'file' is required".to_string())
    })?;

    ensure_email_free(&state, &email).await?;

    let text = extract_resume_text(&file)
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (name, email, experience, parsed_text)
        VALUES ($1, $2, $3, $3)
        RETURNING *
        "#,
    )
    .bind(&name)
    .bind(&email)
    .bind(&text)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(resume))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY id")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<i64>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(fetch_resume(&state, resume_id).await?))
}

/// PUT /api/v1/resumes/:id
///
/// Partial update — unset fields keep their current values.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<i64>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    fetch_resume(&state, resume_id).await?;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes SET
            name = COALESCE($2, name),
            phone = COALESCE($3, phone),
            linkedin_url = COALESCE($4, linkedin_url),
            skills = COALESCE($5, skills),
            experience = COALESCE($6, experience),
            education = COALESCE($7, education)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(resume_id)
    .bind(&request.name)
    .bind(&request.phone)
    .bind(&request.linkedin_url)
    .bind(&request.skills)
    .bind(&request.experience)
    .bind(&request.education)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(resume_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }

    Ok(Json(
        serde_json::json!({ "message": "Resume deleted successfully" }),
    ))
}

/// POST /api/v1/resumes/:id/improve
pub async fn handle_improve_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<i64>,
    Query(overrides): Query<ModelOverride>,
) -> Result<Json<ImproveResponse>, AppError> {
    let resume = fetch_resume(&state, resume_id).await?;
    let experience = resume.experience.as_deref().ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Resume {resume_id} has no experience text"))
    })?;

    let improved = tasks::improve_resume(&state.llm, experience, &overrides).await?;

    sqlx::query("UPDATE resumes SET improved_experience = $2 WHERE id = $1")
        .bind(resume_id)
        .bind(&improved)
        .execute(&state.db)
        .await?;

    Ok(Json(ImproveResponse {
        improved_experience: improved,
    }))
}

/// POST /api/v1/resumes/:id/cover-letter
///
/// Generates a cover letter for an ad-hoc job description and stores it on
/// the résumé row.
pub async fn handle_resume_cover_letter(
    State(state): State<AppState>,
    Path(resume_id): Path<i64>,
    Query(overrides): Query<ModelOverride>,
    Json(request): Json<ResumeCoverLetterRequest>,
) -> Result<Json<CoverLetterTextResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let resume = fetch_resume(&state, resume_id).await?;
    let experience = resume.effective_experience().ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Resume {resume_id} has no experience text"))
    })?;

    let cover_letter =
        tasks::generate_cover_letter(&state.llm, &request.job_description, experience, &overrides)
            .await?;

    sqlx::query("UPDATE resumes SET ai_cover_letter = $2 WHERE id = $1")
        .bind(resume_id)
        .bind(&cover_letter)
        .execute(&state.db)
        .await?;

    Ok(Json(CoverLetterTextResponse { cover_letter }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn fetch_resume(state: &AppState, resume_id: i64) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

async fn ensure_email_free(state: &AppState, email: &str) -> Result<(), AppError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM resumes WHERE email = $1")
        .bind(email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation(
            "Email already exists. Please use a different email.".to_string(),
        ));
    }
    Ok(())
}

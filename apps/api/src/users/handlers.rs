//! Axum route handlers for the Users API. Minimal surface: jobs and cover
//! letters hang off a user id.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserRow>, AppError> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::Validation(
            "name and email are required".to_string(),
        ));
    }

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&request.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation(
            "Email already exists. Please use a different email.".to_string(),
        ));
    }

    let user = sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING *",
    )
    .bind(&request.name)
    .bind(&request.email)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(user))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    Ok(Json(user))
}

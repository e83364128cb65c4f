pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{jobs, letters, matching, resumes, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users API
        .route("/api/v1/users", post(users::handlers::handle_create_user))
        .route("/api/v1/users/:id", get(users::handlers::handle_get_user))
        // Jobs API
        .route(
            "/api/v1/jobs",
            post(jobs::handlers::handle_create_job).get(jobs::handlers::handle_list_jobs),
        )
        .route("/api/v1/jobs/:id", get(jobs::handlers::handle_get_job))
        // Resumes API
        .route(
            "/api/v1/resumes",
            post(resumes::handlers::handle_create_resume)
                .get(resumes::handlers::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/upload",
            post(resumes::handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handlers::handle_get_resume)
                .put(resumes::handlers::handle_update_resume)
                .delete(resumes::handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/improve",
            post(resumes::handlers::handle_improve_resume),
        )
        .route(
            "/api/v1/resumes/:id/cover-letter",
            post(resumes::handlers::handle_resume_cover_letter),
        )
        // Matching API
        .route(
            "/api/v1/job-match/:resume_id/match/:job_id",
            get(matching::handlers::handle_match),
        )
        .route(
            "/api/v1/job-match/:resume_id/optimize/:job_id",
            post(matching::handlers::handle_optimize_for_job),
        )
        // Cover Letters API
        .route(
            "/api/v1/cover-letters/:user_id/:job_id/generate",
            post(letters::handlers::handle_generate_cover_letter),
        )
        .with_state(state)
}

use std::sync::Arc;

use sqlx::PgPool;

use crate::llm::LlmClient;
use crate::matching::engine::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Matching orchestrator; its summarizer/embedder/store collaborators are
    /// injected at startup so tests can substitute fakes.
    pub engine: Arc<MatchEngine>,
}

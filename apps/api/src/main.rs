mod config;
mod db;
mod errors;
mod jobs;
mod letters;
mod llm;
mod matching;
mod models;
mod resumes;
mod routes;
mod state;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm::LlmClient;
use crate::matching::embedder::HfEmbedder;
use crate::matching::engine::{MatchEngine, PgJobDirectory};
use crate::matching::store::PgEmbeddingStore;
use crate::matching::summarizer::HfSummarizer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", config.openrouter_model);

    // Initialize the matching engine with its injected collaborators
    let model_timeout = Duration::from_secs(config.model_timeout_secs);
    let summarizer = HfSummarizer::new(
        config.hf_api_base.clone(),
        config.hf_api_key.clone(),
        config.summarizer_model.clone(),
        model_timeout,
    )?;
    let embedder = HfEmbedder::new(
        config.hf_api_base.clone(),
        config.hf_api_key.clone(),
        config.embedding_model.clone(),
        model_timeout,
    )?;
    let engine = Arc::new(MatchEngine::new(
        Arc::new(summarizer),
        Arc::new(embedder),
        Arc::new(PgEmbeddingStore::new(db.clone())),
        Arc::new(PgJobDirectory::new(db.clone())),
    ));
    info!(
        "Match engine initialized (summarizer: {}, embedder: {})",
        config.summarizer_model, config.embedding_model
    );

    // Build app state
    let state = AppState { db, llm, engine };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

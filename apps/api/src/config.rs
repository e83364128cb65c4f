use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with context if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openrouter_api_key: String,
    /// Default chat model; callers may override per request.
    pub openrouter_model: String,
    pub hf_api_key: String,
    pub hf_api_base: String,
    pub summarizer_model: String,
    pub embedding_model: String,
    /// Bounded deadline for summarization/embedding model calls, in seconds.
    pub model_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            openrouter_model: std::env::var("DEFAULT_MODEL")
                .unwrap_or_else(|_| "qwen/qwen2.5-vl-72b-instruct:free".to_string()),
            hf_api_key: require_env("HF_API_KEY")?,
            hf_api_base: std::env::var("HF_API_BASE")
                .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string()),
            summarizer_model: std::env::var("SUMMARIZER_MODEL")
                .unwrap_or_else(|_| "facebook/bart-large-cnn".to_string()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string()),
            model_timeout_secs: std::env::var("MODEL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("MODEL_TIMEOUT_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

//! Embedding generation — maps a synopsis to a fixed-length dense vector.
//!
//! The hosted model (`sentence-transformers/all-MiniLM-L6-v2`) fixes the
//! dimensionality per model version; downstream code never assumes a
//! particular width, only that the returned vector is non-empty.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::error::MatchError;

/// Produces a dense embedding vector for a piece of text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, MatchError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    inputs: Vec<&'a str>,
}

/// The inference API returns a flat vector for a single input on some
/// deployments and a one-row batch on others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddingResponse {
    Single(Vec<f32>),
    Batch(Vec<Vec<f32>>),
}

impl EmbeddingResponse {
    fn into_vector(self) -> Option<Vec<f32>> {
        match self {
            EmbeddingResponse::Single(v) => Some(v),
            EmbeddingResponse::Batch(rows) => rows.into_iter().next(),
        }
    }
}

/// Hugging Face feature-extraction embedder.
pub struct HfEmbedder {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl HfEmbedder {
    pub fn new(
        api_base: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_base,
            api_key,
            model,
            timeout,
        })
    }
}

#[async_trait]
impl Embedder for HfEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, MatchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MatchError::Embedding("input text is empty".to_string()));
        }

        let url = format!(
            "{}/pipeline/feature-extraction/{}",
            self.api_base, self.model
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest { inputs: vec![text] })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MatchError::Timeout(self.timeout)
                } else {
                    MatchError::Embedding(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MatchError::Embedding(format!(
                "model returned {status}: {body}"
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| MatchError::Embedding(format!("unexpected response: {e}")))?;

        let vector = parsed
            .into_vector()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| MatchError::Embedding("model returned an empty vector".to_string()))?;

        debug!("Embedded {} chars into {} dims", text.len(), vector.len());
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flat_response() {
        let parsed: EmbeddingResponse = serde_json::from_str("[0.1, 0.2, 0.3]").unwrap();
        assert_eq!(parsed.into_vector().unwrap(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_parses_batch_response() {
        let parsed: EmbeddingResponse = serde_json::from_str("[[0.5, -0.5]]").unwrap();
        assert_eq!(parsed.into_vector().unwrap(), vec![0.5, -0.5]);
    }

    #[test]
    fn test_empty_response_rejected() {
        let parsed: EmbeddingResponse = serde_json::from_str("[]").unwrap();
        assert!(parsed.into_vector().filter(|v| !v.is_empty()).is_none());
    }
}

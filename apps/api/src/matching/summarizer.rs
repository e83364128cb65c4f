//! Text summarization — reduces long résumé/job text to a bounded synopsis
//! before embedding.
//!
//! The hosted model (`facebook/bart-large-cnn`) caps its input, so text is
//! truncated to `MAX_INPUT_CHARS` before the call rather than rejected.
//! Sampling is disabled, so a fixed model version gives the same synopsis for
//! the same input.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::error::MatchError;

/// Maximum input length accepted by the summarization model.
/// Longer inputs are truncated, never rejected.
pub const MAX_INPUT_CHARS: usize = 1024;

const SYNOPSIS_MAX_TOKENS: u32 = 150;
const SYNOPSIS_MIN_TOKENS: u32 = 50;

/// Produces a bounded-length synopsis of arbitrary text.
///
/// Implementations must be `Send + Sync`; the engine holds one behind an
/// `Arc` and tests substitute fakes.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, MatchError>;
}

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
}

#[derive(Debug, Serialize)]
struct SummarizationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    summary_text: String,
}

/// Hugging Face inference-API summarizer.
pub struct HfSummarizer {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl HfSummarizer {
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
impl Summarizer for HfSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, MatchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MatchError::Summarization(
                "input text is empty".to_string(),
            ));
        }

        let truncated = truncate_input(text);
        let request = SummarizationRequest {
            inputs: truncated,
            parameters: SummarizationParameters {
                max_length: SYNOPSIS_MAX_TOKENS,
                min_length: SYNOPSIS_MIN_TOKENS,
                do_sample: false,
            },
        };

        let url = format!("{}/models/{}", self.api_base, self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MatchError::Timeout(self.timeout)
                } else {
                    MatchError::Summarization(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MatchError::Summarization(format!(
                "model returned {status}: {body}"
            )));
        }

        let items: Vec<SummaryItem> = response
            .json()
            .await
            .map_err(|e| MatchError::Summarization(format!("unexpected response: {e}")))?;

        let synopsis = items
            .into_iter()
            .next()
            .map(|i| i.summary_text)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                MatchError::Summarization("model returned an empty synopsis".to_string())
            })?;

        debug!(
            "Summarized {} chars to {} chars",
            truncated.len(),
            synopsis.len()
        );
        Ok(synopsis)
    }
}

/// Truncates input to the model's acceptance limit, on a char boundary.
fn truncate_input(text: &str) -> &str {
    if text.len() <= MAX_INPUT_CHARS {
        return text;
    }
    let mut end = MAX_INPUT_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_untouched() {
        assert_eq!(truncate_input("hello"), "hello");
    }

    #[test]
    fn test_long_input_truncated_to_limit() {
        let long = "x".repeat(MAX_INPUT_CHARS * 3);
        assert_eq!(truncate_input(&long).len(), MAX_INPUT_CHARS);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'é' is two bytes; force the cut to land mid-char.
        let long = "é".repeat(MAX_INPUT_CHARS);
        let out = truncate_input(&long);
        assert!(out.len() <= MAX_INPUT_CHARS);
        assert!(out.chars().all(|c| c == 'é'));
    }
}

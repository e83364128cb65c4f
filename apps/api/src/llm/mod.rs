//! LLM client — the single point of entry for all generative calls
//! (résumé improvement, job-targeted rewrites, cover letters).
//!
//! No other module may talk to the OpenRouter API directly. Callers may
//! override the model and API key per request; everything else is fixed here.

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
pub mod tasks;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Per-request model/key override, from the caller's query parameters.
/// Fields left unset fall back to the configured defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ModelOverride {
    pub user_model: Option<String>,
    pub user_api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenRouter chat client used by all generation endpoints.
/// Retries 429 and 5xx responses with exponential backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            model,
        })
    }

    /// Sends one system+user exchange and returns the assistant text.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        overrides: &ModelOverride,
    ) -> Result<String, LlmError> {
        let model = overrides.user_model.as_deref().unwrap_or(&self.model);
        let api_key = overrides.user_api_key.as_deref().unwrap_or(&self.api_key);

        let request_body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(OPENROUTER_API_URL)
                .bearer_auth(api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat: ChatResponse = response.json().await?;
            let content = chat
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .ok_or(LlmError::EmptyContent)?;

            debug!("LLM call succeeded (model: {model}, {} chars)", content.len());
            return Ok(content);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_extracts_first_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Hello there"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Hello there")
        );
    }

    #[test]
    fn test_chat_response_tolerates_missing_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn test_api_error_message_parsed() {
        let json = r#"{"error":{"message":"invalid key","code":401}}"#;
        let parsed: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "invalid key");
    }

    #[test]
    fn test_model_override_defaults_to_none() {
        let o = ModelOverride::default();
        assert!(o.user_model.is_none());
        assert!(o.user_api_key.is_none());
    }
}

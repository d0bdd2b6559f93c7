//! HTTP backend for OpenAI-compatible chat completions (Groq by default)

use super::{ChatMessage, CompletionBackend};
use crate::config::CompletionConfig;
use crate::error::{AppError, AppResult, CompletionError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest upstream error body kept in an error message, in characters
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl From<&CompletionConfig> for SamplingParams {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            top_p: config.top_p(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions over HTTP with bearer-token auth
pub struct GroqBackend {
    client: reqwest::Client,
    completions_url: String,
    api_key: String,
    sampling: SamplingParams,
}

impl GroqBackend {
    /// Create a backend for `config`'s base URL and sampling parameters
    pub fn new(config: &CompletionConfig, api_key: impl Into<String>) -> AppResult<Self> {
        // Overall request time is bounded per attempt by the fallback loop
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            completions_url: format!(
                "{}/chat/completions",
                config.base_url().trim_end_matches('/')
            ),
            api_key: api_key.into(),
            sampling: SamplingParams::from(config),
        })
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

#[async_trait]
impl CompletionBackend for GroqBackend {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let body = CompletionRequest {
            model,
            messages,
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
            top_p: self.sampling.top_p,
            stream: false,
        };

        tracing::debug!(
            model = %model,
            message_count = messages.len(),
            url = %self.completions_url,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network {
                model: model.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CompletionError::Unauthorized {
                model: model.to_string(),
                status: status.as_u16(),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited {
                model: model.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Upstream {
                model: model.to_string(),
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: CompletionResponse =
            response
                .json()
                .await
                .map_err(|e| CompletionError::MalformedResponse {
                    model: model.to_string(),
                    reason: format!("invalid JSON: {}", e),
                })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CompletionError::MalformedResponse {
                model: model.to_string(),
                reason: "response contained no message content".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_completions_url_joins_base_url() {
        let config = crate::config::Config::from_str(
            "[completion]\nbase_url = \"http://localhost:1234/v1/\"\n",
        )
        .unwrap();
        let backend = GroqBackend::new(&config.completion, "gsk_test").unwrap();
        assert_eq!(
            backend.completions_url(),
            "http://localhost:1234/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let messages = [ChatMessage::user("hi")];
        let body = CompletionRequest {
            model: "m",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 1024,
            top_p: 1.0,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["stream"], false);
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}

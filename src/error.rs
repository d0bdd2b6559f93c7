//! Error types for factroute
//!
//! `AppError` covers everything that can reach an HTTP caller and implements
//! `IntoResponse` for Axum handlers. `CompletionError` classifies upstream
//! failures from the completion API; it never leaves the model fallback loop.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    /// The assistant could not be built at startup (missing or placeholder API key)
    #[error("AI agent is not initialized. Check if GROQ_API_KEY is set correctly.")]
    NotConfigured,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigValidationFailed { .. }
            | Self::NotConfigured => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing request: {}", msg),
            ),
        };

        let body = Json(serde_json::json!({
            "detail": message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

/// Failure of a single completion attempt against one model
///
/// Every variant is handled the same way by the fallback loop (try the next
/// model); the classification exists for logs and metrics labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("network error calling {model}: {reason}")]
    Network { model: String, reason: String },

    #[error("{model} did not respond within {timeout_seconds} seconds")]
    Timeout { model: String, timeout_seconds: u64 },

    #[error("{model} rejected the API key (HTTP {status})")]
    Unauthorized { model: String, status: u16 },

    #[error("{model} is rate limited")]
    RateLimited { model: String },

    #[error("{model} returned HTTP {status}: {body}")]
    Upstream {
        model: String,
        status: u16,
        body: String,
    },

    #[error("{model} returned an unusable response: {reason}")]
    MalformedResponse { model: String, reason: String },
}

impl CompletionError {
    /// Short, bounded label for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Timeout { .. } => "timeout",
            Self::Unauthorized { .. } => "unauthorized",
            Self::RateLimited { .. } => "rate_limited",
            Self::Upstream { .. } => "upstream",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_creates() {
        let err = AppError::Config("test error".to_string());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_validation_error_creates() {
        let err = AppError::Validation("Message cannot be empty".to_string());
        assert_eq!(err.to_string(), "Invalid request: Message cannot be empty");
    }

    #[test]
    fn test_not_configured_mentions_api_key() {
        let err = AppError::NotConfigured;
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_validation_error_response_status() {
        let response = AppError::Validation("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_configured_response_status() {
        let response = AppError::NotConfigured.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_response_status() {
        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_body_uses_detail_field() {
        let response = AppError::Validation("Message cannot be empty".to_string()).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Message cannot be empty");
    }

    #[test]
    fn test_completion_error_kinds_are_distinct() {
        let errors = [
            CompletionError::Network {
                model: "m".into(),
                reason: "refused".into(),
            },
            CompletionError::Timeout {
                model: "m".into(),
                timeout_seconds: 1,
            },
            CompletionError::Unauthorized {
                model: "m".into(),
                status: 401,
            },
            CompletionError::RateLimited { model: "m".into() },
            CompletionError::Upstream {
                model: "m".into(),
                status: 500,
                body: String::new(),
            },
            CompletionError::MalformedResponse {
                model: "m".into(),
                reason: "no choices".into(),
            },
        ];
        let mut kinds: Vec<_> = errors.iter().map(CompletionError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }
}

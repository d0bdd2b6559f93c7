//! Chat endpoint handler
//!
//! Handles POST /chat: validates the message, then hands it to the
//! assistant for the caller's session.

use crate::assistant::{ChatOutcome, validate_message};
use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::memory::DEFAULT_SESSION;
use crate::middleware::RequestId;
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

/// Chat request from client
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    message: String,
    #[serde(default)]
    user_id: Option<String>,
}

impl ChatRequest {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Session key; blank or absent ids share the default session
    pub fn user_id(&self) -> &str {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_SESSION)
    }
}

/// Chat response to client
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub used_tool: bool,
    pub tool_result: Option<String>,
    pub status: &'static str,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            response: outcome.response,
            used_tool: outcome.used_tool,
            tool_result: outcome.tool_result,
            status: "success",
        }
    }
}

/// Chat handler
///
/// Input is validated before the assistant is consulted, so an empty message
/// is a 400 even when the service is not configured.
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let user_id = request.user_id();

    if let Err(e) = validate_message(request.message()) {
        tracing::warn!(request_id = %request_id, user_id = %user_id, error = %e, "Rejected chat message");
        return Err(e);
    }

    let Some(assistant) = state.assistant() else {
        tracing::error!(request_id = %request_id, "Chat requested but assistant is not initialized");
        return Err(AppError::NotConfigured);
    };

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        message_chars = request.message().chars().count(),
        "Received chat message"
    );

    let outcome = assistant.handle(user_id, request.message()).await?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        used_tool = outcome.used_tool,
        response_chars = outcome.response.chars().count(),
        "Chat message answered"
    );

    Ok(Json(outcome.into()))
}

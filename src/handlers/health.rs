//! Service status endpoints
//!
//! `GET /` is a liveness banner; `GET /health` is for monitoring and load
//! balancers and answers 503 while the assistant is unavailable.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::handlers::AppState;

/// Human-readable service name reported by `/health`
pub const SERVICE_NAME: &str = "AI Question-Answer Helper";

const FEATURES: &str = "Factual Q&A + Conversational AI with Groq";

/// Connection state of the completion API
fn api_status(state: &AppState) -> &'static str {
    if state.assistant().is_some() {
        "connected"
    } else {
        "disconnected"
    }
}

/// Response for `GET /`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    /// `healthy` or `agent_not_initialized`
    pub status: &'static str,
    pub groq_api: &'static str,
    pub features: &'static str,
    pub version: &'static str,
}

/// Response for `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`
    pub status: &'static str,
    pub service: &'static str,
    pub groq_api: &'static str,
    /// Live messages across all sessions
    pub memory_size: usize,
    pub sessions: usize,
    pub version: &'static str,
}

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let status = if state.assistant().is_some() {
        "healthy"
    } else {
        "agent_not_initialized"
    };

    Json(RootResponse {
        message: "AI Question-Answer Helper API is running!",
        status,
        groq_api: api_status(&state),
        features: FEATURES,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health check handler
///
/// Purges expired messages before counting so `memory_size` reflects live
/// state.
pub async fn handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let memory_size = state.sessions().total_messages().await;
    let sessions = state.sessions().session_count().await;

    let (code, status) = if state.assistant().is_some() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            status,
            service: SERVICE_NAME,
            groq_api: api_status(&state),
            memory_size,
            sessions,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

//! Conversation memory management

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::handlers::AppState;

/// Query parameters for `POST /clear`
#[derive(Debug, Default, Deserialize)]
pub struct ClearParams {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub status: &'static str,
    pub message: String,
}

/// Clear one session when `user_id` is given, otherwise all of them
pub async fn clear(
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> Json<ClearResponse> {
    let user_id = params
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let removed = state.sessions().clear(user_id).await;

    let message = match user_id {
        Some(id) => format!("Memory cleared for user '{}'", id),
        None => "Memory cleared".to_string(),
    };

    tracing::info!(user_id = ?user_id, sessions_removed = removed, "Conversation memory cleared");

    Json(ClearResponse {
        status: "success",
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::memory::Role;

    #[tokio::test]
    async fn test_clear_all_sessions() {
        let state = AppState::new(Config::default()).unwrap();
        state.sessions().add_message("a", Role::User, "x").await;
        state.sessions().add_message("b", Role::User, "y").await;

        let Json(body) = clear(State(state.clone()), Query(ClearParams::default())).await;
        assert_eq!(body.status, "success");
        assert_eq!(body.message, "Memory cleared");
        assert_eq!(state.sessions().total_messages().await, 0);
    }

    #[tokio::test]
    async fn test_clear_one_session() {
        let state = AppState::new(Config::default()).unwrap();
        state.sessions().add_message("a", Role::User, "x").await;
        state.sessions().add_message("b", Role::User, "y").await;

        let params = ClearParams {
            user_id: Some("a".to_string()),
        };
        let Json(body) = clear(State(state.clone()), Query(params)).await;
        assert_eq!(body.message, "Memory cleared for user 'a'");
        assert_eq!(state.sessions().session_len("a").await, 0);
        assert_eq!(state.sessions().session_len("b").await, 1);
    }
}

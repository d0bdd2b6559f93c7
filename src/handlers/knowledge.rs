//! Knowledge base listing

use axum::{Json, extract::State};

use crate::handlers::AppState;
use crate::knowledge::KnowledgeCatalog;

pub async fn handler(State(state): State<AppState>) -> Json<KnowledgeCatalog> {
    Json(state.knowledge().catalog())
}

//! HTTP request handlers for the factroute API

use crate::assistant::Assistant;
use crate::config::{API_KEY_ENV, Config};
use crate::error::{AppError, AppResult};
use crate::knowledge::KnowledgeBase;
use crate::memory::SessionStore;
use crate::metrics::Metrics;
use crate::middleware::request_id_middleware;
use crate::models::{CompletionBackend, CompletionClient, GroqBackend};
use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod chat;
pub mod health;
pub mod knowledge;
pub mod metrics;
pub mod session;

/// Application state shared across all handlers
///
/// All fields are Arc'd (or `Copy`) for cheap cloning across Axum handlers.
/// `assistant` is `None` when no usable API key was configured; the service
/// still starts and reports itself unhealthy.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    assistant: Option<Arc<Assistant>>,
    sessions: Arc<SessionStore>,
    knowledge: KnowledgeBase,
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Create state talking to the configured completion API
    ///
    /// A missing or placeholder API key is not an error; chat is disabled.
    pub fn new(config: Config) -> AppResult<Self> {
        let backend: Option<Arc<dyn CompletionBackend>> = match config.completion.api_key() {
            Some(api_key) => Some(Arc::new(GroqBackend::new(&config.completion, api_key)?)),
            None => {
                tracing::warn!(
                    env = API_KEY_ENV,
                    "No usable API key configured, chat is disabled"
                );
                None
            }
        };
        Self::build(config, backend)
    }

    /// Create state with an explicit completion backend
    pub fn with_backend(config: Config, backend: Arc<dyn CompletionBackend>) -> AppResult<Self> {
        Self::build(config, Some(backend))
    }

    fn build(config: Config, backend: Option<Arc<dyn CompletionBackend>>) -> AppResult<Self> {
        let metrics = Arc::new(
            Metrics::new()
                .map_err(|e| AppError::Internal(format!("Failed to initialize metrics: {}", e)))?,
        );
        let sessions = Arc::new(SessionStore::from_config(&config.memory));
        let knowledge = KnowledgeBase::builtin();

        let assistant = backend.map(|backend| {
            let completion = CompletionClient::new(
                backend,
                config.completion.models().to_vec(),
                config.completion.attempt_timeout(),
                metrics.clone(),
            );
            Arc::new(Assistant::new(
                knowledge,
                sessions.clone(),
                completion,
                metrics.clone(),
                config.memory.context_messages,
            ))
        });

        tracing::info!(
            models = ?config.completion.models(),
            knowledge_entries = knowledge.len(),
            memory_max_size = config.memory.max_size,
            memory_ttl_minutes = config.memory.ttl_minutes,
            assistant_ready = assistant.is_some(),
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            assistant,
            sessions,
            knowledge,
            metrics,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The assistant, if one could be built at startup
    pub fn assistant(&self) -> Option<&Assistant> {
        self.assistant.as_deref()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Build the HTTP router with all endpoints and middleware
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::handler))
        .route("/chat", post(chat::handler))
        .route("/clear", post(session::clear))
        .route("/knowledge", get(knowledge::handler))
        .route("/metrics", get(metrics::handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(panic = %detail, "Request handler panicked");
    AppError::Internal(detail).into_response()
}

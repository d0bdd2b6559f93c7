//! Ordered model fallback
//!
//! Tries each configured model once, in order, with an independent timeout
//! per attempt. The first reply wins. Every failure kind is handled the same
//! way (log it, move on); there is no backoff and no second pass.

use super::{ChatMessage, CompletionBackend};
use crate::error::CompletionError;
use crate::metrics::{ATTEMPT_SUCCESS, DegradedReason, Metrics};
use std::sync::Arc;
use std::time::Duration;

/// Text returned when every model failed
pub const FALLBACK_REPLY: &str = "I'm currently experiencing technical difficulties with the AI service. However, I can still answer questions using my built-in knowledge base for factual information.";

/// A successful completion and the model that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    pub model: String,
    pub text: String,
}

/// Completion client that falls back across a fixed list of models
pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
    models: Vec<String>,
    attempt_timeout: Duration,
    metrics: Arc<Metrics>,
}

impl CompletionClient {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        models: Vec<String>,
        attempt_timeout: Duration,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            backend,
            models,
            attempt_timeout,
            metrics,
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Reply text from the first model that answers, or [`FALLBACK_REPLY`]
    pub async fn complete(&self, messages: &[ChatMessage]) -> String {
        match self.try_models(messages).await {
            Some(reply) => reply.text,
            None => {
                if let Err(e) = self
                    .metrics
                    .record_degraded_reply(DegradedReason::AllModelsFailed)
                {
                    tracing::error!(error = %e, "Metrics recording failed (non-fatal)");
                }
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Try each model in order; `None` once all of them have failed
    pub async fn try_models(&self, messages: &[ChatMessage]) -> Option<ModelReply> {
        let total = self.models.len();

        for (index, model) in self.models.iter().enumerate() {
            let attempt = index + 1;
            tracing::debug!(model = %model, attempt, total, "Trying model");

            let result = match tokio::time::timeout(
                self.attempt_timeout,
                self.backend.complete(model, messages),
            )
            .await
            {
                Ok(result) => result,
                Err(_elapsed) => Err(CompletionError::Timeout {
                    model: model.clone(),
                    timeout_seconds: self.attempt_timeout.as_secs(),
                }),
            };

            match result {
                Ok(text) => {
                    tracing::info!(model = %model, attempt, total, "Model answered");
                    self.record_attempt(model, ATTEMPT_SUCCESS);
                    return Some(ModelReply {
                        model: model.clone(),
                        text,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        model = %model,
                        attempt,
                        total,
                        error_kind = e.kind(),
                        error = %e,
                        "Model failed, trying next"
                    );
                    self.record_attempt(model, e.kind());
                }
            }
        }

        tracing::error!(total, "All models failed, serving fallback reply");
        None
    }

    fn record_attempt(&self, model: &str, outcome: &str) {
        // Metrics must never break a request
        if let Err(e) = self.metrics.record_model_attempt(model, outcome) {
            tracing::error!(model = %model, outcome, error = %e, "Metrics recording failed (non-fatal)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Backend with a scripted result per model that records call order
    struct ScriptedBackend {
        replies: HashMap<String, Result<String, CompletionError>>,
        delay: HashMap<String, Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new() -> Self {
            Self {
                replies: HashMap::new(),
                delay: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn ok(mut self, model: &str, text: &str) -> Self {
            self.replies.insert(model.to_string(), Ok(text.to_string()));
            self
        }

        fn fail(mut self, model: &str) -> Self {
            self.replies.insert(
                model.to_string(),
                Err(CompletionError::Upstream {
                    model: model.to_string(),
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            );
            self
        }

        fn slow(mut self, model: &str, delay: Duration) -> Self {
            self.delay.insert(model.to_string(), delay);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            model: &str,
            _messages: &[ChatMessage],
        ) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push(model.to_string());
            if let Some(delay) = self.delay.get(model) {
                tokio::time::sleep(*delay).await;
            }
            self.replies
                .get(model)
                .cloned()
                .unwrap_or_else(|| Err(CompletionError::Network {
                    model: model.to_string(),
                    reason: "unscripted".to_string(),
                }))
        }
    }

    fn client(backend: Arc<ScriptedBackend>, models: &[&str]) -> (CompletionClient, Arc<Metrics>) {
        client_with_timeout(backend, models, Duration::from_secs(5))
    }

    fn client_with_timeout(
        backend: Arc<ScriptedBackend>,
        models: &[&str],
        attempt_timeout: Duration,
    ) -> (CompletionClient, Arc<Metrics>) {
        let metrics = Arc::new(Metrics::new().unwrap());
        let client = CompletionClient::new(
            backend,
            models.iter().map(|m| m.to_string()).collect(),
            attempt_timeout,
            metrics.clone(),
        );
        (client, metrics)
    }

    fn prompt() -> Vec<ChatMessage> {
        vec![ChatMessage::user("hello")]
    }

    #[tokio::test]
    async fn test_first_success_wins_without_trying_later_models() {
        let backend = Arc::new(ScriptedBackend::new().ok("a", "from a").ok("b", "from b"));
        let (client, _) = client(backend.clone(), &["a", "b"]);

        assert_eq!(client.complete(&prompt()).await, "from a");
        assert_eq!(backend.calls(), ["a"]);
    }

    #[tokio::test]
    async fn test_only_last_model_succeeds() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .fail("a")
                .fail("b")
                .ok("c", "from c"),
        );
        let (client, metrics) = client(backend.clone(), &["a", "b", "c"]);

        let reply = client.try_models(&prompt()).await.expect("c should answer");
        assert_eq!(reply.model, "c");
        assert_eq!(reply.text, "from c");
        assert_eq!(backend.calls(), ["a", "b", "c"]);
        assert_eq!(metrics.model_attempts_count("a", "upstream"), 1);
        assert_eq!(metrics.model_attempts_count("c", ATTEMPT_SUCCESS), 1);
    }

    #[tokio::test]
    async fn test_all_models_failing_returns_fallback_text() {
        let backend = Arc::new(ScriptedBackend::new().fail("a").fail("b"));
        let (client, metrics) = client(backend.clone(), &["a", "b"]);

        assert_eq!(client.complete(&prompt()).await, FALLBACK_REPLY);
        assert_eq!(backend.calls(), ["a", "b"]);
        assert_eq!(
            metrics.degraded_replies_count(DegradedReason::AllModelsFailed),
            1
        );
    }

    #[tokio::test]
    async fn test_slow_model_times_out_and_next_is_tried() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .ok("slow", "too late")
                .slow("slow", Duration::from_secs(60))
                .ok("fast", "on time"),
        );
        let (client, metrics) =
            client_with_timeout(backend.clone(), &["slow", "fast"], Duration::from_millis(50));

        assert_eq!(client.complete(&prompt()).await, "on time");
        assert_eq!(metrics.model_attempts_count("slow", "timeout"), 1);
    }

    #[tokio::test]
    async fn test_empty_model_list_returns_fallback_text() {
        let backend = Arc::new(ScriptedBackend::new());
        let (client, _) = client(backend.clone(), &[]);
        assert_eq!(client.complete(&prompt()).await, FALLBACK_REPLY);
        assert!(backend.calls().is_empty());
    }
}

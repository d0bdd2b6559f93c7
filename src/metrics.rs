//! Prometheus metrics collection for factroute
//!
//! This module provides metrics instrumentation for tracking:
//! - Chat requests by question kind
//! - Completion attempts by model and outcome
//! - Degraded replies (fallback text served instead of a model answer)
//!
//! Metrics are exposed via the `/metrics` endpoint in Prometheus text format.

use crate::router::QuestionKind;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Outcome label for a completion attempt
///
/// Successful attempts are labelled `success`; failures use
/// [`CompletionError::kind`](crate::error::CompletionError::kind).
pub const ATTEMPT_SUCCESS: &str = "success";

/// Why a degraded reply was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    /// Every configured model failed
    AllModelsFailed,
    /// The completion call panicked
    CompletionPanicked,
}

impl DegradedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllModelsFailed => "all_models_failed",
            Self::CompletionPanicked => "completion_panicked",
        }
    }
}

/// Metrics collector for factroute
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    requests_total: IntCounterVec,
    model_attempts: IntCounterVec,
    degraded_replies: IntCounterVec,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all metrics with a new Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Cardinality: 2 question kinds
        let requests_total = IntCounterVec::new(
            Opts::new(
                "factroute_requests_total",
                "Total number of chat requests by question kind",
            ),
            &["kind"],
        )?;

        // Cardinality: configured models x 7 outcomes (bounded by config)
        let model_attempts = IntCounterVec::new(
            Opts::new(
                "factroute_model_attempts_total",
                "Completion attempts by model and outcome",
            ),
            &["model", "outcome"],
        )?;

        let degraded_replies = IntCounterVec::new(
            Opts::new(
                "factroute_degraded_replies_total",
                "Replies served from fallback text instead of a model answer",
            ),
            &["reason"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(model_attempts.clone()))?;
        registry.register(Box::new(degraded_replies.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            model_attempts,
            degraded_replies,
        })
    }

    /// Record a classified chat request
    pub fn record_request(&self, kind: QuestionKind) -> Result<(), prometheus::Error> {
        self.requests_total
            .get_metric_with_label_values(&[kind.as_str()])?
            .inc();
        Ok(())
    }

    /// Record one completion attempt against `model`
    pub fn record_model_attempt(&self, model: &str, outcome: &str) -> Result<(), prometheus::Error> {
        self.model_attempts
            .get_metric_with_label_values(&[model, outcome])?
            .inc();
        Ok(())
    }

    /// Record a degraded reply
    pub fn record_degraded_reply(&self, reason: DegradedReason) -> Result<(), prometheus::Error> {
        self.degraded_replies
            .get_metric_with_label_values(&[reason.as_str()])?
            .inc();
        Ok(())
    }

    pub fn requests_count(&self, kind: QuestionKind) -> u64 {
        self.requests_total.with_label_values(&[kind.as_str()]).get()
    }

    pub fn model_attempts_count(&self, model: &str, outcome: &str) -> u64 {
        self.model_attempts
            .with_label_values(&[model, outcome])
            .get()
    }

    pub fn degraded_replies_count(&self, reason: DegradedReason) -> u64 {
        self.degraded_replies
            .with_label_values(&[reason.as_str()])
            .get()
    }

    /// Encode all metrics in Prometheus text format
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    metric_family_count = metric_families.len(),
                    "Prometheus text encoder failed"
                );
                e
            })?;

        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!("Metrics output is not valid UTF-8: {}", e))
        })
    }
}

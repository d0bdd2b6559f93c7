//! Request handling: classify, look up or assemble context, complete, remember
//!
//! The assistant owns no locks itself. Memory writes go through the shared
//! [`SessionStore`], and the remote completion runs with no lock held.

use crate::error::{AppError, AppResult};
use crate::knowledge::KnowledgeBase;
use crate::memory::{Message, Role, SessionStore};
use crate::metrics::{DegradedReason, Metrics};
use crate::models::{ChatMessage, CompletionClient};
use crate::router::{KeywordClassifier, QuestionKind};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Maximum accepted message length, in characters
pub const MAX_MESSAGE_CHARS: usize = 100_000;

const FACTUAL_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that answers questions using provided search results.

Guidelines:
- Use the search result to answer factual questions accurately
- If the search result doesn't contain the answer, acknowledge this and provide a helpful response
- Keep answers concise and informative
- Always be helpful and friendly";

const CONVERSATIONAL_SYSTEM_PROMPT: &str = "You are a helpful, friendly, and concise AI assistant. Use the conversation history for context when relevant.";

const APOLOGY_REPLY: &str =
    "I apologize, but I'm having trouble processing your request right now. Please try again.";

/// Result of handling one chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub response: String,
    pub used_tool: bool,
    pub tool_result: Option<String>,
}

/// Answers chat messages for any number of sessions
pub struct Assistant {
    classifier: KeywordClassifier,
    knowledge: KnowledgeBase,
    sessions: Arc<SessionStore>,
    completion: CompletionClient,
    metrics: Arc<Metrics>,
    context_messages: usize,
}

impl Assistant {
    pub fn new(
        knowledge: KnowledgeBase,
        sessions: Arc<SessionStore>,
        completion: CompletionClient,
        metrics: Arc<Metrics>,
        context_messages: usize,
    ) -> Self {
        Self {
            classifier: KeywordClassifier::new(),
            knowledge,
            sessions,
            completion,
            metrics,
            context_messages,
        }
    }

    /// Answer `message` on behalf of `user_id`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty or oversized input; nothing
    /// is recorded in that case. Remote failures never surface as errors.
    pub async fn handle(&self, user_id: &str, message: &str) -> AppResult<ChatOutcome> {
        let message = validate_message(message)?;

        self.sessions.add_message(user_id, Role::User, message).await;

        let kind = self.classifier.classify(message);
        if let Err(e) = self.metrics.record_request(kind) {
            tracing::error!(kind = %kind, error = %e, "Metrics recording failed (non-fatal)");
        }

        let (prompt, tool_result) = match kind {
            QuestionKind::Factual => {
                let tool_result = self.knowledge.lookup(message);
                tracing::debug!(user_id = %user_id, tool_result = %tool_result, "Knowledge lookup");
                (factual_prompt(message, &tool_result), Some(tool_result))
            }
            QuestionKind::Conversational => {
                let context = self
                    .sessions
                    .recent_context(user_id, self.context_messages)
                    .await;
                tracing::debug!(
                    user_id = %user_id,
                    context_messages = context.len(),
                    "Using conversation context"
                );
                (conversational_prompt(message, &context), None)
            }
        };

        tracing::info!(
            user_id = %user_id,
            kind = %kind,
            prompt_messages = prompt.len(),
            "Handling chat message"
        );

        let response = match AssertUnwindSafe(self.completion.complete(&prompt))
            .catch_unwind()
            .await
        {
            Ok(text) => text,
            Err(_) => {
                tracing::error!(user_id = %user_id, "Completion panicked, serving degraded reply");
                if let Err(e) = self
                    .metrics
                    .record_degraded_reply(DegradedReason::CompletionPanicked)
                {
                    tracing::error!(error = %e, "Metrics recording failed (non-fatal)");
                }
                degraded_reply(tool_result.as_deref())
            }
        };

        self.sessions
            .add_message(user_id, Role::Assistant, response.clone())
            .await;

        Ok(ChatOutcome {
            response,
            used_tool: kind.is_factual(),
            tool_result,
        })
    }
}

/// Trimmed message, or a validation error
pub fn validate_message(message: &str) -> AppResult<&str> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }
    let chars = trimmed.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "Message too long: {} characters (max {})",
            chars, MAX_MESSAGE_CHARS
        )));
    }
    Ok(trimmed)
}

fn factual_prompt(message: &str, tool_result: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(FACTUAL_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Question: {}\n\nSearch Result: {}\n\nPlease answer the question based on the search result above.",
            message, tool_result
        )),
    ]
}

fn conversational_prompt(message: &str, context: &[Message]) -> Vec<ChatMessage> {
    let mut prompt = Vec::with_capacity(context.len() + 2);
    prompt.push(ChatMessage::system(CONVERSATIONAL_SYSTEM_PROMPT));
    prompt.extend(context.iter().map(ChatMessage::from));

    // The window normally ends with the message just recorded; it may not if
    // the context size is zero or the message was evicted concurrently.
    let ends_with_current = context
        .last()
        .is_some_and(|m| m.role() == Role::User && m.content() == message);
    if !ends_with_current {
        prompt.push(ChatMessage::user(message));
    }
    prompt
}

fn degraded_reply(tool_result: Option<&str>) -> String {
    match tool_result {
        Some(result) => format!("Based on my search: {}", result),
        None => APOLOGY_REPLY.to_string(),
    }
}

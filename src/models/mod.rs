//! Completion clients and model fallback
//!
//! [`CompletionBackend`] is one remote call against one model. [`GroqBackend`]
//! implements it over HTTP; [`CompletionClient`] walks the configured model list
//! on top of any backend.

pub mod client;
pub mod fallback;

pub use client::GroqBackend;
pub use fallback::{CompletionClient, FALLBACK_REPLY, ModelReply};

use crate::error::CompletionError;
use crate::memory::{Message, Role};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A message in the shape the chat completions API expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self::new(message.role(), message.content())
    }
}

/// A single chat completion call against one model
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Return the model's reply text
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serializes_lowercase_role() {
        let json = serde_json::to_value(ChatMessage::system("be brief")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "be brief"}));
    }

    #[test]
    fn test_chat_message_from_memory_message() {
        let mut memory = crate::memory::ConversationMemory::new(2, std::time::Duration::from_secs(60));
        memory.add_message(Role::Assistant, "hello");
        let context = memory.get_recent_context(1);
        assert_eq!(
            ChatMessage::from(&context[0]),
            ChatMessage::new(Role::Assistant, "hello")
        );
    }
}

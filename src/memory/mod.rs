//! Short-term conversation memory
//!
//! [`ConversationMemory`] is a bounded, time-expiring window of role-tagged
//! messages. [`SessionStore`] keeps one window per user id so callers never
//! see each other's history.

pub mod sessions;

pub use sessions::{DEFAULT_SESSION, SessionStore};

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// A message retained in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
    created_at: Instant,
}

impl Message {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Bounded, time-expiring message window
///
/// Invariants, restored before every read and after every write:
/// - no retained message is `ttl` old or older
/// - at most `max_size` messages are retained, oldest evicted first
///
/// Not synchronized; wrap it (see [`SessionStore`]) for shared use.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    messages: VecDeque<Message>,
    max_size: usize,
    ttl: Duration,
}

impl ConversationMemory {
    /// Create an empty memory with the given bounds
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_size.saturating_add(1)),
            max_size,
            ttl,
        }
    }

    /// Append a message stamped with the current time
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.add_message_at(role, content, Instant::now());
    }

    /// Append a message stamped with `now`
    pub fn add_message_at(&mut self, role: Role, content: impl Into<String>, now: Instant) {
        self.messages.push_back(Message {
            role,
            content: content.into(),
            created_at: now,
        });
        self.cleanup(now);
    }

    /// The last `limit` live messages, oldest first
    pub fn get_recent_context(&mut self, limit: usize) -> Vec<Message> {
        self.get_recent_context_at(limit, Instant::now())
    }

    pub fn get_recent_context_at(&mut self, limit: usize, now: Instant) -> Vec<Message> {
        self.cleanup(now);
        let skip = self.messages.len().saturating_sub(limit);
        self.messages.iter().skip(skip).cloned().collect()
    }

    /// Number of live messages
    pub fn len(&mut self) -> usize {
        self.len_at(Instant::now())
    }

    pub fn len_at(&mut self, now: Instant) -> usize {
        self.cleanup(now);
        self.messages.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Drop every message
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn cleanup(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.messages.retain(|m| !m.is_expired(now, ttl));

        while self.messages.len() > self.max_size {
            self.messages.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(30 * 60);

    fn contents(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(Message::content).collect()
    }

    #[test]
    fn test_recent_context_is_oldest_first() {
        let mut memory = ConversationMemory::new(5, TTL);
        memory.add_message(Role::User, "hi");
        memory.add_message(Role::Assistant, "hello");
        memory.add_message(Role::User, "how are you");

        let context = memory.get_recent_context(2);
        assert_eq!(contents(&context), ["hello", "how are you"]);
        assert_eq!(context[0].role(), Role::Assistant);
    }

    #[test]
    fn test_limit_larger_than_history_returns_everything() {
        let mut memory = ConversationMemory::new(5, TTL);
        memory.add_message(Role::User, "only");
        assert_eq!(contents(&memory.get_recent_context(10)), ["only"]);
        assert!(memory.get_recent_context(0).is_empty());
    }

    #[test]
    fn test_capacity_keeps_last_max_size_in_order() {
        let max_size = 5;
        let mut memory = ConversationMemory::new(max_size, TTL);
        for i in 0..max_size + 3 {
            memory.add_message(Role::User, format!("m{}", i));
        }

        assert_eq!(memory.len(), max_size);
        assert_eq!(
            contents(&memory.get_recent_context(usize::MAX)),
            ["m3", "m4", "m5", "m6", "m7"]
        );
    }

    #[test]
    fn test_expired_message_is_absent_on_read() {
        let start = Instant::now();
        let mut memory = ConversationMemory::new(5, TTL);
        memory.add_message_at(Role::User, "old", start);

        let later = start + TTL;
        assert!(memory.get_recent_context_at(5, later).is_empty());
        assert_eq!(memory.len_at(later), 0);
    }

    #[test]
    fn test_message_just_inside_ttl_survives() {
        let start = Instant::now();
        let mut memory = ConversationMemory::new(5, TTL);
        memory.add_message_at(Role::User, "fresh", start);

        let almost = start + TTL - Duration::from_secs(1);
        assert_eq!(contents(&memory.get_recent_context_at(5, almost)), ["fresh"]);
    }

    #[test]
    fn test_write_purges_expired_messages() {
        let start = Instant::now();
        let mut memory = ConversationMemory::new(5, TTL);
        memory.add_message_at(Role::User, "first", start);
        memory.add_message_at(Role::Assistant, "second", start + Duration::from_secs(60));

        // Writing after the first message expired leaves only the live ones
        let later = start + TTL + Duration::from_secs(1);
        memory.add_message_at(Role::User, "third", later);
        assert_eq!(
            contents(&memory.get_recent_context_at(5, later)),
            ["second", "third"]
        );
    }

    #[test]
    fn test_clear_empties_memory() {
        let mut memory = ConversationMemory::new(5, TTL);
        memory.add_message(Role::User, "a");
        memory.add_message(Role::Assistant, "b");
        memory.clear();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
        assert_eq!(Role::System.as_str(), "system");
    }
}

//! Per-user conversation memories
//!
//! Each user id owns an independent [`ConversationMemory`]. Sessions are created
//! on first write and dropped once all their messages have expired.

use super::{ConversationMemory, Message, Role};
use crate::config::MemoryConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Session used when a request does not name a user
pub const DEFAULT_SESSION: &str = "default";

/// Map of user id to conversation memory
///
/// The lock is only held for in-memory operations, never across a remote call.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, ConversationMemory>>,
    max_size: usize,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions use the given bounds
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_size,
            ttl,
        }
    }

    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.max_size, config.ttl())
    }

    /// Record a message in `user_id`'s session, creating it if needed
    ///
    /// Sessions whose messages have all expired are dropped first, so the map
    /// only ever holds users with live history.
    pub async fn add_message(&self, user_id: &str, role: Role, content: impl Into<String>) {
        self.add_message_at(user_id, role, content, Instant::now())
            .await;
    }

    pub async fn add_message_at(
        &self,
        user_id: &str,
        role: Role,
        content: impl Into<String>,
        now: Instant,
    ) {
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, memory| memory.len_at(now) > 0);
        sessions
            .entry(user_id.to_string())
            .or_insert_with(|| ConversationMemory::new(self.max_size, self.ttl))
            .add_message_at(role, content, now);
    }

    /// The last `limit` messages of `user_id`'s session, oldest first
    pub async fn recent_context(&self, user_id: &str, limit: usize) -> Vec<Message> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .get_mut(user_id)
            .map(|memory| memory.get_recent_context(limit))
            .unwrap_or_default()
    }

    /// Live message count for one session
    pub async fn session_len(&self, user_id: &str) -> usize {
        let mut sessions = self.sessions.lock().await;
        sessions.get_mut(user_id).map_or(0, |memory| memory.len())
    }

    /// Clear one session, or every session when `user_id` is `None`
    ///
    /// Returns the number of sessions removed.
    pub async fn clear(&self, user_id: Option<&str>) -> usize {
        let mut sessions = self.sessions.lock().await;
        match user_id {
            Some(id) => usize::from(sessions.remove(id).is_some()),
            None => {
                let removed = sessions.len();
                sessions.clear();
                removed
            }
        }
    }

    /// Live messages across all sessions; drops sessions that have emptied
    pub async fn total_messages(&self) -> usize {
        self.total_messages_at(Instant::now()).await
    }

    pub async fn total_messages_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, memory| memory.len_at(now) > 0);
        sessions.values_mut().map(|memory| memory.len_at(now)).sum()
    }

    /// Number of sessions currently held
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

//! Routing logic for factroute
//!
//! Decides whether a message is answered from the knowledge base (factual)
//! or handed to the completion API with conversation context.

pub mod rule_based;

pub use rule_based::{FACTUAL_KEYWORDS, KeywordClassifier};

use serde::{Deserialize, Serialize};

/// Classification of an incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Answered with a knowledge-base lookup injected into a single-turn prompt
    Factual,
    /// Answered by the model with recent conversation context
    Conversational,
}

impl QuestionKind {
    /// Convert to string representation for logging and metrics labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Factual => "factual",
            Self::Conversational => "conversational",
        }
    }

    pub fn is_factual(&self) -> bool {
        matches!(self, Self::Factual)
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Keyword-based question classification
//!
//! Fast, deterministic classification using substring matching on the
//! lower-cased message. Zero LLM overhead - all decisions are pure CPU logic.
//!
//! There is no tokenization, stemming or negation handling: "what is" inside
//! "somewhat isolated" still counts. The phrase list is the whole rule set.

use super::QuestionKind;

/// Trigger phrases that mark a message as a factual question
pub const FACTUAL_KEYWORDS: &[&str] = &[
    "what is",
    "who is",
    "when was",
    "where is",
    "how many",
    "how much",
    "capital of",
    "population of",
    "height of",
    "inventor of",
    "year",
    "largest",
    "smallest",
    "chemical symbol",
    "founder of",
    "speed of",
    "distance to",
    "how tall",
    "how big",
    "what are",
    "who invented",
    "when did",
    "where are",
];

/// Classifier that labels messages factual when they contain a trigger phrase
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Create a new keyword classifier
    pub fn new() -> Self {
        Self
    }

    /// Returns true if any trigger phrase occurs in the message
    ///
    /// Empty and whitespace-only messages are never factual.
    pub fn is_factual(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        FACTUAL_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
    }

    /// Classify a message
    pub fn classify(&self, message: &str) -> QuestionKind {
        if self.is_factual(message) {
            QuestionKind::Factual
        } else {
            QuestionKind::Conversational
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_capital_question_is_factual() {
        let classifier = KeywordClassifier::new();
        assert!(classifier.is_factual("What is the capital of Japan?"));
        assert_eq!(
            classifier.classify("What is the capital of Japan?"),
            QuestionKind::Factual
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let classifier = KeywordClassifier::new();
        assert!(classifier.is_factual("HOW MANY planets are there"));
        assert!(classifier.is_factual("Who Invented the telephone"));
    }

    #[test]
    fn test_keyword_inside_longer_text_matches() {
        // Substring semantics: "year" inside "yearly" still triggers
        let classifier = KeywordClassifier::new();
        assert!(classifier.is_factual("my yearly review went fine"));
    }

    #[test]
    fn test_greeting_is_conversational() {
        let classifier = KeywordClassifier::new();
        assert!(!classifier.is_factual("Hello, how are you today?"));
        assert_eq!(
            classifier.classify("Tell me a joke"),
            QuestionKind::Conversational
        );
    }

    #[test]
    fn test_empty_and_whitespace_are_conversational() {
        let classifier = KeywordClassifier::new();
        assert!(!classifier.is_factual(""));
        assert!(!classifier.is_factual("   \n\t"));
    }

    #[test]
    fn test_every_keyword_contains_a_vowel() {
        for keyword in FACTUAL_KEYWORDS {
            assert!(
                keyword.chars().any(|c| "aeiou".contains(c)),
                "keyword '{}' has no vowel",
                keyword
            );
        }
    }

    #[test]
    fn test_every_keyword_triggers_on_its_own() {
        let classifier = KeywordClassifier::new();
        for keyword in FACTUAL_KEYWORDS {
            assert!(
                classifier.is_factual(&keyword.to_uppercase()),
                "keyword '{}' should classify as factual",
                keyword
            );
        }
    }

    proptest! {
        // Every trigger phrase contains a vowel, so vowel-free text never matches
        #[test]
        fn prop_vowel_free_messages_are_conversational(
            message in "[b-df-hj-np-tv-zB-DF-HJ-NP-TV-Z0-9 ,.!?]{0,80}",
        ) {
            prop_assert!(!KeywordClassifier::new().is_factual(&message));
        }

        #[test]
        fn prop_prefixing_a_keyword_makes_any_message_factual(
            keyword in proptest::sample::select(FACTUAL_KEYWORDS),
            tail in "[a-zA-Z ?]{0,40}",
        ) {
            let message = format!("{} {}", keyword, tail);
            prop_assert!(KeywordClassifier::new().is_factual(&message));
        }
    }
}

//! Static knowledge base used for factual questions
//!
//! A literal, fixed mapping from entity keys to canned answers. Lookup is a
//! sequence of substring checks (see [`KnowledgeBase::lookup`]); nothing here
//! ranks or scores results.

mod catalog;

use serde::Serialize;

/// Kind of fact a record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Capital,
    Population,
    Height,
    Inventor,
    Founder,
    Speed,
    Symbol,
    Formula,
    Size,
    EndYear,
    Planets,
    Description,
}

impl Topic {
    /// Topics recognised by entity extraction, in the order they are scanned
    pub const EXTRACTABLE: [Topic; 8] = [
        Topic::Capital,
        Topic::Population,
        Topic::Height,
        Topic::Inventor,
        Topic::Founder,
        Topic::Speed,
        Topic::Symbol,
        Topic::Formula,
    ];

    /// Word that names this topic inside a question
    pub fn keyword(&self) -> &'static str {
        match self {
            Topic::Capital => "capital",
            Topic::Population => "population",
            Topic::Height => "height",
            Topic::Inventor => "inventor",
            Topic::Founder => "founder",
            Topic::Speed => "speed",
            Topic::Symbol => "symbol",
            Topic::Formula => "formula",
            Topic::Size => "size",
            Topic::EndYear => "end_year",
            Topic::Planets => "planets",
            Topic::Description => "description",
        }
    }
}

/// Grouping used by the `/knowledge` listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Country,
    Science,
    General,
}

/// A single attribute of an entity with its canned answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fact {
    pub topic: Topic,
    pub value: &'static str,
    pub answer: &'static str,
}

/// One entity and everything known about it
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeEntry {
    pub key: &'static str,
    pub category: Category,
    pub facts: &'static [Fact],
}

impl KnowledgeEntry {
    /// Fact for `topic`, if this entity has one
    pub fn fact(&self, topic: Topic) -> Option<&'static Fact> {
        self.facts.iter().find(|f| f.topic == topic)
    }

    /// Answer returned when the entity is matched without a specific topic
    pub fn primary_answer(&self) -> Option<&'static str> {
        self.facts.first().map(|f| f.answer)
    }
}

/// Multi-phrase checks tried after entity extraction
struct SpecialCase {
    all_of: &'static [&'static str],
    key: &'static str,
    topic: Topic,
}

const SPECIAL_CASES: &[SpecialCase] = &[
    SpecialCase {
        all_of: &["mount everest", "height"],
        key: "mount everest",
        topic: Topic::Height,
    },
    SpecialCase {
        all_of: &["telephone", "invent"],
        key: "telephone",
        topic: Topic::Inventor,
    },
    SpecialCase {
        all_of: &["largest ocean"],
        key: "pacific ocean",
        topic: Topic::Size,
    },
    SpecialCase {
        all_of: &["speed of light"],
        key: "light",
        topic: Topic::Speed,
    },
    SpecialCase {
        all_of: &["gold", "symbol"],
        key: "gold",
        topic: Topic::Symbol,
    },
    SpecialCase {
        all_of: &["world war", "end"],
        key: "world war ii",
        topic: Topic::EndYear,
    },
    SpecialCase {
        all_of: &["microsoft", "found"],
        key: "microsoft",
        topic: Topic::Founder,
    },
    SpecialCase {
        all_of: &["solar system", "planet"],
        key: "solar system",
        topic: Topic::Planets,
    },
];

/// Topic listing returned by `GET /knowledge`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KnowledgeCatalog {
    pub total_topics: usize,
    /// `"<country> - <capital>"` for every record with a capital
    pub capitals: Vec<String>,
    pub science_facts: Vec<&'static str>,
    pub general_topics: Vec<&'static str>,
}

/// Read-only knowledge base
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    entries: &'static [KnowledgeEntry],
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// The knowledge base compiled into the binary
    pub fn builtin() -> Self {
        Self {
            entries: catalog::ENTRIES,
        }
    }

    /// All records in lookup order
    pub fn entries(&self) -> &'static [KnowledgeEntry] {
        self.entries
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record with exactly this key
    pub fn get(&self, key: &str) -> Option<&'static KnowledgeEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Answer a factual query; always returns text
    ///
    /// Checks run in order and the first hit wins:
    /// 1. exact key match on the trimmed, lower-cased query
    /// 2. a known country plus a topic word the country has a fact for
    /// 3. fixed multi-phrase special cases
    /// 4. "what is" questions about a handful of general topics
    /// 5. any record key occurring in the query, in record order
    ///
    /// Otherwise a "not found" message echoing `query` verbatim is returned.
    pub fn lookup(&self, query: &str) -> String {
        match self.find_answer(query) {
            Some(answer) => answer.to_string(),
            None => format!(
                "I couldn't find specific information about '{}' in my knowledge base.",
                query
            ),
        }
    }

    /// Same as [`lookup`](Self::lookup) but `None` when nothing matched
    pub fn find_answer(&self, query: &str) -> Option<&'static str> {
        let normalized = query.trim().to_lowercase();

        if let Some(answer) = self.get(&normalized).and_then(KnowledgeEntry::primary_answer) {
            tracing::debug!(key = %normalized, "Knowledge lookup: exact key match");
            return Some(answer);
        }

        if let Some(answer) = self.match_country_topic(&normalized) {
            return Some(answer);
        }

        if let Some(answer) = self.match_special_case(&normalized) {
            return Some(answer);
        }

        if let Some(answer) = self.match_what_is(&normalized) {
            return Some(answer);
        }

        let fallback = self
            .entries
            .iter()
            .find(|e| normalized.contains(e.key))
            .and_then(KnowledgeEntry::primary_answer);
        if fallback.is_none() {
            tracing::debug!(query = %normalized, "Knowledge lookup: no match");
        }
        fallback
    }

    fn match_country_topic(&self, query: &str) -> Option<&'static str> {
        let country = self
            .entries
            .iter()
            .filter(|e| e.category == Category::Country)
            .find(|e| query.contains(e.key))?;
        let topic = Topic::EXTRACTABLE
            .into_iter()
            .find(|t| query.contains(t.keyword()))?;

        tracing::debug!(
            country = country.key,
            topic = topic.keyword(),
            "Knowledge lookup: extracted country and topic"
        );

        country.fact(topic).map(|f| f.answer)
    }

    fn match_special_case(&self, query: &str) -> Option<&'static str> {
        SPECIAL_CASES
            .iter()
            .find(|case| case.all_of.iter().all(|phrase| query.contains(phrase)))
            .and_then(|case| self.get(case.key)?.fact(case.topic))
            .map(|f| f.answer)
    }

    fn match_what_is(&self, query: &str) -> Option<&'static str> {
        if !query.contains("what is") {
            return None;
        }

        let key = if query.contains("python") {
            "python"
        } else if query.contains("artificial intelligence") || has_word(query, "ai") {
            "artificial intelligence"
        } else if query.contains("machine learning") {
            "machine learning"
        } else if query.contains("groq") {
            "groq"
        } else {
            return None;
        };

        self.get(key).and_then(KnowledgeEntry::primary_answer)
    }

    /// Group topics for listing
    pub fn catalog(&self) -> KnowledgeCatalog {
        let capitals = self
            .entries
            .iter()
            .filter_map(|e| {
                e.fact(Topic::Capital)
                    .map(|f| format!("{} - {}", e.key, f.value))
            })
            .collect();

        let keys_in = |category: Category| {
            self.entries
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.key)
                .collect::<Vec<_>>()
        };

        KnowledgeCatalog {
            total_topics: self.entries.len(),
            capitals,
            science_facts: keys_in(Category::Science),
            general_topics: keys_in(Category::General),
        }
    }
}

/// True if `word` appears in `text` delimited by non-alphanumeric characters
fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

//! Built-in knowledge records
//!
//! One record per entity. Entities that carry more than one fact (China and
//! India have both a capital and a population) keep all of them in the same
//! record; the first fact is the record's primary answer.

use super::{Category, Fact, KnowledgeEntry, Topic};

// Struct literals rather than const fn calls so the nested fact slices are
// promoted to 'static.
macro_rules! capital {
    ($value:expr, $answer:expr $(,)?) => {
        Fact {
            topic: Topic::Capital,
            value: $value,
            answer: $answer,
        }
    };
}

macro_rules! fact {
    ($topic:ident, $value:expr, $answer:expr $(,)?) => {
        Fact {
            topic: Topic::$topic,
            value: $value,
            answer: $answer,
        }
    };
}

const fn country(key: &'static str, facts: &'static [Fact]) -> KnowledgeEntry {
    KnowledgeEntry {
        key,
        category: Category::Country,
        facts,
    }
}

const fn science(key: &'static str, facts: &'static [Fact]) -> KnowledgeEntry {
    KnowledgeEntry {
        key,
        category: Category::Science,
        facts,
    }
}

const fn general(key: &'static str, facts: &'static [Fact]) -> KnowledgeEntry {
    KnowledgeEntry {
        key,
        category: Category::General,
        facts,
    }
}

/// Records in lookup order; the fallback scan walks them front to back
pub(super) static ENTRIES: &[KnowledgeEntry] = &[
    country(
        "france",
        &[capital!("Paris", "The capital of France is Paris.")],
    ),
    country(
        "germany",
        &[capital!("Berlin", "The capital of Germany is Berlin.")],
    ),
    country("italy", &[capital!("Rome", "The capital of Italy is Rome.")]),
    country(
        "spain",
        &[capital!("Madrid", "The capital of Spain is Madrid.")],
    ),
    country(
        "japan",
        &[capital!("Tokyo", "The capital of Japan is Tokyo.")],
    ),
    country(
        "china",
        &[
            capital!("Beijing", "The capital of China is Beijing."),
            fact!(
                Population,
                "1.4 billion",
                "The population of China is approximately 1.4 billion people.",
            ),
        ],
    ),
    country(
        "india",
        &[
            capital!("New Delhi", "The capital of India is New Delhi."),
            fact!(
                Population,
                "1.3 billion",
                "The population of India is approximately 1.3 billion people.",
            ),
        ],
    ),
    country(
        "russia",
        &[capital!("Moscow", "The capital of Russia is Moscow.")],
    ),
    country(
        "brazil",
        &[capital!("Brasília", "The capital of Brazil is Brasília.")],
    ),
    country(
        "canada",
        &[capital!("Ottawa", "The capital of Canada is Ottawa.")],
    ),
    country(
        "australia",
        &[capital!("Canberra", "The capital of Australia is Canberra.")],
    ),
    country(
        "kenya",
        &[capital!("Nairobi", "The capital of Kenya is Nairobi.")],
    ),
    country(
        "egypt",
        &[capital!("Cairo", "The capital of Egypt is Cairo.")],
    ),
    country(
        "south africa",
        &[capital!(
            "Pretoria",
            "The capital of South Africa is Pretoria.",
        )],
    ),
    country(
        "nigeria",
        &[capital!("Abuja", "The capital of Nigeria is Abuja.")],
    ),
    country(
        "ethiopia",
        &[capital!("Addis Ababa", "The capital of Ethiopia is Addis Ababa.")],
    ),
    country(
        "ghana",
        &[capital!("Accra", "The capital of Ghana is Accra.")],
    ),
    country(
        "united states",
        &[capital!(
            "Washington D.C.",
            "The capital of United States is Washington D.C.",
        )],
    ),
    country(
        "united kingdom",
        &[capital!("London", "The capital of United Kingdom is London.")],
    ),
    science(
        "mount everest",
        &[fact!(
            Height,
            "8,848 meters",
            "Mount Everest is 8,848 meters (29,029 feet) tall.",
        )],
    ),
    science(
        "telephone",
        &[fact!(
            Inventor,
            "Alexander Graham Bell",
            "Alexander Graham Bell is credited with inventing the telephone.",
        )],
    ),
    general(
        "pacific ocean",
        &[fact!(
            Size,
            "largest",
            "The Pacific Ocean is the largest ocean on Earth.",
        )],
    ),
    science(
        "light",
        &[fact!(
            Speed,
            "299,792,458 m/s",
            "The speed of light in vacuum is 299,792,458 meters per second.",
        )],
    ),
    science(
        "gold",
        &[fact!(
            Symbol,
            "Au",
            "The chemical symbol for gold is Au.",
        )],
    ),
    science(
        "oxygen",
        &[fact!(
            Symbol,
            "O",
            "The chemical symbol for oxygen is O.",
        )],
    ),
    science(
        "water",
        &[fact!(
            Formula,
            "H₂O",
            "The chemical formula for water is H₂O.",
        )],
    ),
    general(
        "world war ii",
        &[fact!(EndYear, "1945", "World War II ended in 1945.")],
    ),
    general(
        "microsoft",
        &[fact!(
            Founder,
            "Bill Gates and Paul Allen",
            "Microsoft was founded by Bill Gates and Paul Allen.",
        )],
    ),
    general(
        "apple",
        &[fact!(
            Founder,
            "Steve Jobs, Steve Wozniak, and Ronald Wayne",
            "Apple was founded by Steve Jobs, Steve Wozniak, and Ronald Wayne.",
        )],
    ),
    science(
        "solar system",
        &[fact!(
            Planets,
            "8",
            "There are 8 planets in our solar system: Mercury, Venus, Earth, Mars, Jupiter, Saturn, Uranus, and Neptune.",
        )],
    ),
    general(
        "python",
        &[fact!(
            Description,
            "programming language",
            "Python is a high-level programming language known for its simplicity and readability.",
        )],
    ),
    general(
        "artificial intelligence",
        &[fact!(
            Description,
            "AI simulation",
            "Artificial Intelligence (AI) is the simulation of human intelligence in machines.",
        )],
    ),
    general(
        "machine learning",
        &[fact!(
            Description,
            "AI subset",
            "Machine learning is a subset of AI that enables computers to learn without being explicitly programmed.",
        )],
    ),
    general(
        "groq",
        &[fact!(
            Description,
            "AI chip company",
            "Groq is a company that develops AI inference chips and provides fast AI API services.",
        )],
    ),
];

//! Routing performance benchmarks
//!
//! Measures the non-I/O request path: keyword classification, knowledge
//! lookup and config parsing. Network calls are excluded.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use factroute::{config::Config, knowledge::KnowledgeBase, router::KeywordClassifier};
use std::hint::black_box;
use std::str::FromStr;

const QUESTIONS: &[(&str, &str)] = &[
    ("exact_key", "python"),
    ("country_topic", "What is the capital of Japan?"),
    ("special_case", "How tall is Mount Everest? What is its height?"),
    ("what_is", "what is machine learning"),
    ("fallback_scan", "tell me about the pacific ocean"),
    ("not_found", "who painted the mona lisa"),
];

fn bench_classification(c: &mut Criterion) {
    let classifier = KeywordClassifier::new();
    let mut group = c.benchmark_group("classification");

    for (name, message) in [
        ("factual", "What is the population of India?"),
        ("conversational", "Hi there, how are you doing today?"),
        ("long_conversational", &*"lorem ipsum dolor sit amet ".repeat(200)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), message, |b, m| {
            b.iter(|| classifier.classify(black_box(m)));
        });
    }

    group.finish();
}

fn bench_knowledge_lookup(c: &mut Criterion) {
    let knowledge = KnowledgeBase::builtin();
    let mut group = c.benchmark_group("knowledge_lookup");

    for (name, query) in QUESTIONS {
        group.bench_with_input(BenchmarkId::from_parameter(name), query, |b, q| {
            b.iter(|| knowledge.lookup(black_box(q)));
        });
    }

    group.finish();
}

fn bench_config_parsing(c: &mut Criterion) {
    let template = factroute::cli::generate_config_template();
    c.bench_function("config_parse_template", |b| {
        b.iter(|| Config::from_str(black_box(template)));
    });
}

criterion_group!(
    benches,
    bench_classification,
    bench_knowledge_lookup,
    bench_config_parsing
);
criterion_main!(benches);

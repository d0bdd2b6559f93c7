//! factroute - question router with a built-in knowledge base
//!
//! Factual questions are answered from a static knowledge base and phrased by
//! a hosted LLM; everything else is sent to the LLM with recent conversation
//! context. Completions fall back across an ordered list of models.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod knowledge;
pub mod memory;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod router;
pub mod telemetry;

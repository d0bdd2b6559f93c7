//! Command-line interface for factroute
//!
//! Provides argument parsing and subcommand handling for the factroute binary.

use clap::{Parser, Subcommand};

/// Question-answering router with a built-in knowledge base
#[derive(Parser)]
#[command(name = "factroute")]
#[command(version)]
#[command(about = "Question-answering router with a built-in knowledge base")]
#[command(
    long_about = "factroute answers factual questions from a built-in knowledge base and \
    forwards conversational messages to hosted LLMs, falling back across a list of models \
    when a completion call fails."
)]
pub struct Cli {
    /// Path to configuration file (built-in defaults are used if it does not exist)
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# factroute configuration
#
# Every value below is the built-in default; delete anything you do not
# need to change. The API key is read from the GROQ_API_KEY environment
# variable and never from this file. HOST and PORT override [server].

# ─────────────────────────────────────────────────────────────────────────────
# SERVER
# ─────────────────────────────────────────────────────────────────────────────

[server]
host = "0.0.0.0"
port = 8000

# ─────────────────────────────────────────────────────────────────────────────
# COMPLETION API
# ─────────────────────────────────────────────────────────────────────────────
#
# Any OpenAI-compatible chat completions API works. Models are tried in
# order; the first one that answers wins.

[completion]
base_url = "https://api.groq.com/openai/v1"
models = [
    "llama-3.1-8b-instant",
    "llama-3.1-70b-versatile",
    "mixtral-8x7b-32768",
    "gemma2-9b-it",
]
temperature = 0.7
max_tokens = 1024
top_p = 1.0

# Each model attempt gets its own budget, in seconds (1-300)
attempt_timeout_seconds = 30

# ─────────────────────────────────────────────────────────────────────────────
# CONVERSATION MEMORY (per user_id)
# ─────────────────────────────────────────────────────────────────────────────

[memory]
max_size = 6
ttl_minutes = 30

# Recent messages sent along with conversational questions
context_messages = 4

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG wins if set)
log_level = "info"
"#
}

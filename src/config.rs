//! Configuration management for factroute
//!
//! Parses TOML configuration files, layers environment overrides on top and
//! provides typed access to settings. The Groq API key is only ever taken from
//! the environment.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the completion API key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Upper bound for a single model attempt, in seconds
const MAX_ATTEMPT_TIMEOUT_SECONDS: u64 = 300;

/// Where a loaded configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was absent; built-in defaults were used
    Defaults,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Completion API configuration
///
/// Fields are private so validated values cannot be mutated afterwards.
/// `api_key` is never (de)serialized; it comes from [`API_KEY_ENV`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionConfig {
    #[serde(default = "default_base_url")]
    base_url: String,
    /// Model identifiers, tried in order until one succeeds
    #[serde(default = "default_models")]
    models: Vec<String>,
    #[serde(default = "default_temperature")]
    temperature: f64,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_top_p")]
    top_p: f64,
    /// Timeout applied to each model attempt independently
    #[serde(default = "default_attempt_timeout")]
    attempt_timeout_seconds: u64,
    #[serde(skip)]
    api_key: Option<String>,
}

impl CompletionConfig {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ordered model identifiers
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn top_p(&self) -> f64 {
        self.top_p
    }

    /// Per-attempt timeout
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_seconds)
    }

    /// The API key, if one is set and does not look like a placeholder
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !is_placeholder_key(key))
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            models: default_models(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            attempt_timeout_seconds: default_attempt_timeout(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_models() -> Vec<String> {
    [
        "llama-3.1-8b-instant",
        "llama-3.1-70b-versatile",
        "mixtral-8x7b-32768",
        "gemma2-9b-it",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_top_p() -> f64 {
    1.0
}

fn default_attempt_timeout() -> u64 {
    30
}

/// Returns true for keys that are empty or obviously copied from a template
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || key.starts_with("your_") || key.contains("example")
}

/// Conversation memory bounds
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Maximum messages retained per session
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Messages older than this are purged
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
    /// How many recent messages a conversational turn sends upstream
    #[serde(default = "default_context_messages")]
    pub context_messages: usize,
}

impl MemoryConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            ttl_minutes: default_ttl_minutes(),
            context_messages: default_context_messages(),
        }
    }
}

fn default_max_size() -> usize {
    6
}

fn default_ttl_minutes() -> u64 {
    30
}

fn default_context_messages() -> usize {
    4
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            })?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from built-in defaults
    ///
    /// Runs before logging is set up, so it reports where the values came from
    /// instead of logging it.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> AppResult<(Self, ConfigSource)> {
        if path.as_ref().exists() {
            Ok((Self::from_file(path)?, ConfigSource::File))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Apply environment overrides using the given variable lookup
    ///
    /// Recognised variables: `GROQ_API_KEY`, `HOST`, `PORT`. Taking the lookup
    /// as a closure keeps this testable without mutating the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.completion.api_key = Some(key.trim().to_string());
        }

        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host.trim().to_string();
        }

        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                AppError::Config(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        let completion = &self.completion;

        if completion.models.is_empty() {
            return Err(AppError::Config(
                "completion.models must list at least one model".to_string(),
            ));
        }
        if let Some(position) = completion.models.iter().position(|m| m.trim().is_empty()) {
            return Err(AppError::Config(format!(
                "completion.models[{}] cannot be empty",
                position
            )));
        }

        if !completion.base_url.starts_with("http://")
            && !completion.base_url.starts_with("https://")
        {
            return Err(AppError::Config(format!(
                "completion.base_url must start with http:// or https://, got '{}'",
                completion.base_url
            )));
        }

        if !(0.0..=2.0).contains(&completion.temperature) {
            return Err(AppError::Config(format!(
                "completion.temperature must be between 0.0 and 2.0, got {}",
                completion.temperature
            )));
        }

        if !(completion.top_p > 0.0 && completion.top_p <= 1.0) {
            return Err(AppError::Config(format!(
                "completion.top_p must be in (0.0, 1.0], got {}",
                completion.top_p
            )));
        }

        if completion.max_tokens == 0 {
            return Err(AppError::Config(
                "completion.max_tokens must be greater than 0".to_string(),
            ));
        }

        if completion.attempt_timeout_seconds == 0 {
            return Err(AppError::Config(
                "completion.attempt_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if completion.attempt_timeout_seconds > MAX_ATTEMPT_TIMEOUT_SECONDS {
            return Err(AppError::Config(format!(
                "completion.attempt_timeout_seconds cannot exceed {} seconds, got {}",
                MAX_ATTEMPT_TIMEOUT_SECONDS, completion.attempt_timeout_seconds
            )));
        }

        if self.memory.max_size == 0 {
            return Err(AppError::Config(
                "memory.max_size must be at least 1".to_string(),
            ));
        }
        if self.memory.ttl_minutes == 0 {
            return Err(AppError::Config(
                "memory.ttl_minutes must be greater than 0".to_string(),
            ));
        }
        if self.memory.context_messages == 0 {
            return Err(AppError::Config(
                "memory.context_messages must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

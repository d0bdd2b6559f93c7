//! Telemetry and observability setup
//!
//! Configures structured logging with tracing and tracing-subscriber.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Build the default filter directive for a configured log level
///
/// Our own crate logs at `level`; the tower-http trace layer logs request spans
/// at debug so they show up when the crate is turned up.
pub fn default_directive(level: &str) -> String {
    format!("factroute={},tower_http=debug", level.trim().to_lowercase())
}

/// Initialize tracing subscriber for structured logging
///
/// This can only be called once per process. Subsequent calls are silently ignored.
/// `RUST_LOG` wins over the configured level when it is set.
///
/// # Examples
///
/// ```no_run
/// factroute::telemetry::init("info");
/// tracing::info!("Application started");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_normalizes_level() {
        assert_eq!(default_directive(" DEBUG "), "factroute=debug,tower_http=debug");
    }

    #[test]
    fn test_default_directive_parses_as_filter() {
        assert!(EnvFilter::try_new(default_directive("warn")).is_ok());
    }
}

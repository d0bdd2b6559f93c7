//! factroute HTTP server
//!
//! Starts an Axum web server that answers questions from the built-in
//! knowledge base and hosted LLMs.

use clap::Parser;
use factroute::{
    cli::{Cli, Command, generate_config_template},
    config::{Config, ConfigSource},
    handlers::{self, AppState},
    telemetry,
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::Config { output }) = cli.command {
        let template = generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(&path, template)?;
                eprintln!("Wrote configuration template to {}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    let (mut config, source) = Config::load_or_default(&cli.config)?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;

    telemetry::init(&config.observability.log_level);

    if source == ConfigSource::Defaults {
        tracing::info!(path = %cli.config, "Config file not found, using built-in defaults");
    }

    tracing::info!(
        config = %cli.config,
        "Starting factroute server on {}:{}",
        config.server.host,
        config.server.port
    );

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0])),
        config.server.port,
    ));

    let state = AppState::new(config)?;
    let app = handlers::routes(state);

    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

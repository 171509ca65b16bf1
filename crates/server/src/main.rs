mod bootstrap;
mod command;
mod health;
mod interactive;
mod jira;
mod respond;
mod sweeper;

use std::time::Duration;

use anyhow::Result;
use axum::Router;

use bugline_core::config::{AppConfig, LoadOptions};

const TTL_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

fn init_logging(config: &AppConfig) {
    use bugline_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    let router = Router::new()
        .merge(health::router(app.db_pool.clone()))
        .merge(command::router(command::CommandState {
            verification_token: app.config.slack.verification_token.clone(),
            chat: app.chat.clone(),
        }))
        .merge(interactive::router(interactive::InteractiveState {
            verification_token: app.config.slack.verification_token.clone(),
            reports: app.reports.clone(),
            chat: app.chat.clone(),
            tracker: app.tracker.clone(),
        }));

    sweeper::spawn(app.reports.clone(), TTL_SWEEP_INTERVAL);

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "bugline-server started"
    );

    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        "bugline-server stopping"
    );

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

//! Timepad relay web server.
//!
//! This binary:
//! - Loads configuration from the environment (and `.env`)
//! - Serves the ticket and order webhook endpoints
//! - Posts paid events to Slack

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;

use relay::{logging, router, AppState, Config, SlackNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes first: logging needs LOG_DIR
    let config = Config::from_env().context("Failed to load configuration")?;

    let _log_guard =
        logging::init(config.log_dir.as_deref()).context("Failed to open log directory")?;

    info!("relay_starting");
    config.log_fallbacks();
    info!(
        port = config.port,
        channel = %config.slack_channel_id,
        slack_api_base_url = %config.slack_api_base_url,
        notify_timeout_ms = config.notify_timeout_ms,
        file_logging = config.log_dir.is_some(),
        "config_loaded"
    );

    let notifier = SlackNotifier::new(
        config.slack_api_base_url.clone(),
        config.slack_bot_token.clone(),
        Duration::from_millis(config.notify_timeout_ms),
    )
    .context("Failed to build Slack client")?;

    let port = config.port;
    let state = AppState::new(config, Arc::new(notifier));
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "relay_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("relay_shutting_down");
}

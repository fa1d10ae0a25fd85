//! # ofpd: heating controller dashboard daemon
//!
//! Composition root that wires the controller client and the dashboard
//! together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Build the HTTP client implementing the controller port
//! - Build the dashboard, arm the periodic zone refresh
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all the dashboard crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use ofp_adapter_http_axum::state::AppState;
use ofp_app::dashboard::Dashboard;
use ofp_app::error_panel::ErrorPanel;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Controller
    let client = config.client_config().build()?;

    // Dashboard
    let dashboard = Dashboard::new(client, Arc::new(ErrorPanel::default()));
    let refresh = dashboard.spawn_refresh(config.refresh_period());

    // HTTP
    let state = AppState::new(dashboard, config.dashboard.refresh_seconds);
    let app = ofp_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        controller = %config.controller.base_url,
        "ofpd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    refresh.abort();

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => {
            tracing::error!(%err, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

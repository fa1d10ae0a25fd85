//! # ofp-mockd: mock heating controller
//!
//! Serves the controller REST API from in-memory state so the dashboard can
//! be developed without the hardware.

mod config;

use std::sync::Arc;

use ofp_adapter_mock::InMemoryController;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, bind_addr) = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter()))
        .init();

    let controller = Arc::new(InMemoryController::new(config.reboot_grace()));
    let app = ofp_adapter_mock::router::build(controller);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "ofp-mockd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutting down");
            } else {
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}

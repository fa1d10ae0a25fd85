//! Axum router assembly.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::API_PREFIX;
use crate::store::InMemoryController;

/// Build the mock controller [`Router`]: the REST API under [`API_PREFIX`]
/// plus `/health`.
pub fn build(controller: Arc<InMemoryController>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(controller)
}

async fn health_check() -> &'static str {
    "OK"
}

//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use ofp_app::ports::ControllerApi;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the dashboard pages at `/` plus `/health`, with a [`TraceLayer`]
/// logging each request.
pub fn build<A>(state: AppState<A>) -> Router
where
    A: ControllerApi + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

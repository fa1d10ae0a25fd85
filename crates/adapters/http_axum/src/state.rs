//! Shared application state for axum handlers.

use std::sync::Arc;

use ofp_app::dashboard::Dashboard;
use ofp_app::ports::ControllerApi;

/// Seconds between two reloads of the zone section when not configured.
pub const DEFAULT_REFRESH_SECONDS: u32 = 5;

/// Application state shared across all axum handlers.
///
/// Generic over the controller implementation to avoid dynamic dispatch.
/// `Clone` is implemented manually so `A` itself does not need to be
/// `Clone`: only the `Arc` is cloned.
pub struct AppState<A> {
    pub dashboard: Arc<Dashboard<A>>,
    /// Meta refresh period of the zone section page.
    pub refresh_seconds: u32,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            dashboard: Arc::clone(&self.dashboard),
            refresh_seconds: self.refresh_seconds,
        }
    }
}

impl<A> AppState<A>
where
    A: ControllerApi + 'static,
{
    pub fn new(dashboard: Dashboard<A>, refresh_seconds: u32) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            refresh_seconds: refresh_seconds.max(1),
        }
    }
}

//! # ofp-app
//!
//! Application layer: the controller API **port** and the dashboard
//! view controllers built on top of it.
//!
//! ## Responsibilities
//! - Define the [`ControllerApi`](ports::ControllerApi) port that the HTTP
//!   client (and the in-memory mock) implement
//! - One view controller per dashboard section: fetch, then turn the
//!   records into a view model ready for templating
//! - Validate user input before any request is issued
//! - Collect failures into the [`ErrorPanel`](error_panel::ErrorPanel)
//! - Bootstrap every section concurrently and keep the zone section fresh
//!   with the [`ZoneRefresher`](refresh::ZoneRefresher)
//!
//! ## Dependency rule
//! Depends on `ofp-domain` only (plus `tokio` for timers and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dashboard;
pub mod error_panel;
pub mod ports;
pub mod refresh;
pub mod render;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

//! # ofp-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the heating controller administration page, rendered server-side
//!   with [askama](https://docs.rs/askama) templates and working with **zero
//!   JavaScript**
//! - Map form posts into dashboard actions (driving adapter)
//! - Map the dashboard page model into HTML
//!
//! ## No-JS dashboard approach
//! - Every page is rendered server-side as complete HTML.
//! - Each control is a `<form>` whose action path carries the record id.
//!   Handlers redirect back with `303 See Other` (PRG pattern).
//! - The zone section page uses `<meta http-equiv="refresh">` to reload at
//!   the configured interval.
//!
//! ## Dependency rule
//! Depends on `ofp-app` (dashboard facade and port) and `ofp-domain` (form
//! field names). Never leaks axum types into the application layer.

pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

pub use state::AppState;

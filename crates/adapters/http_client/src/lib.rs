//! # ofp-adapter-http-client
//!
//! Talks to the heating controller's REST API with
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the [`ControllerApi`](ofp_app::ports::ControllerApi) port
//! - Join the configured base URL and API prefix with each endpoint path
//! - Translate non-2xx answers, transport failures and malformed bodies into
//!   the localized [`OfpError`](ofp_domain::error::OfpError) variants
//!
//! ## Dependency rule
//! Depends on `ofp-app` (for the port trait) and `ofp-domain` (for wire
//! types). The `app` and `domain` crates must never reference this adapter.

pub mod client;
mod controller;
pub mod error;

pub use client::{Config, HttpClient};
pub use error::ClientError;

//! # ofp-adapter-mock
//!
//! Stand-in for the heating controller firmware.
//!
//! ## Responsibilities
//! - Hold the controller state in memory, seeded from the development
//!   fixtures (eight zones, three plannings, three accounts)
//! - Enforce the controller invariants: known orders, existing plannings,
//!   slot and account limits, protected `admin` account
//! - Serve the firmware REST API under [`API_PREFIX`] so the dashboard can run
//!   against it over HTTP
//! - Implement [`ofp_app::ports::ControllerApi`] directly for in-process tests
//!
//! A reboot request makes every endpoint answer `503` for a grace period,
//! after which uptime restarts and a staged firmware image becomes the
//! running one.

pub mod api;
pub mod error;
pub mod fixtures;
pub mod router;
pub mod store;

pub use store::InMemoryController;

/// Prefix under which the firmware serves its REST API.
pub const API_PREFIX: &str = "/ofp-api/v1";

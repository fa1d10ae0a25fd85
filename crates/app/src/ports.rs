//! Port definitions: traits that adapters implement.
//!
//! The dashboard never talks HTTP itself. It goes through [`ControllerApi`],
//! implemented by the `reqwest` client in production and by the in-memory
//! controller in tests and in the mock server.

pub mod controller;

pub use controller::ControllerApi;

//! # ofp-domain
//!
//! Pure domain model for the OFP heating controller administration.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, limits
//! - Define **Orders** (heating instruction levels) and the **Override**
//! - Define **Zones** and their tagged operating **mode**
//! - Define **Plannings** and their time-triggered **slots**, including the
//!   display ordering and the active-order evaluation
//! - Define **Accounts**, **Hardware** descriptors and the **Status** report
//! - Inspect firmware images and certificate bundles before upload
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! The controller REST API is expressed as a trait in the `app` crate (port).

pub mod error;
pub mod id;
pub mod limits;
pub mod time;

pub mod account;
pub mod certificate;
pub mod firmware;
pub mod hardware;
pub mod order;
pub mod override_order;
pub mod planning;
pub mod status;
pub mod zone;

//! View controllers, one per dashboard section.
//!
//! Each controller fetches what its section needs, then renders it into a
//! view model that templates display as-is. Mutations validate their input
//! first: invalid input is dropped without calling the controller.

pub mod accounts;
pub mod firmware;
pub mod hardware;
pub mod planning_slots;
pub mod plannings;
pub mod status;
pub mod zone_configuration;
pub mod zone_override;

/// What became of a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The controller accepted the change.
    Applied,
    /// Input was invalid or unchanged. Nothing was sent.
    Skipped,
    /// The change was accepted and only takes effect after a reboot.
    Reboot,
    /// The request failed. The error went to the panel.
    Failed,
}

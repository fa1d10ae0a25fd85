//! Capacity limits of the controller firmware.

pub const MAX_ACCOUNTS: usize = 16;
pub const MAX_ZONES: usize = 64;
pub const MAX_PLANNINGS: usize = 32;
pub const MAX_SLOTS_PER_PLANNING: usize = 64;

/// Longest account identifier accepted by the controller.
pub const MAX_ACCOUNT_ID_LEN: usize = 15;

//! Typed identifier newtypes.
//!
//! The controller names zones, orders, accounts and hardware with short
//! strings (`e1z1`, `cozy`, `admin`, `M1E1`) and numbers plannings and their
//! slots. Both kinds serialize transparently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_string_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier as received from the controller.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

macro_rules! define_numeric_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            #[must_use]
            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

define_string_id!(
    /// Identifier of a [`Zone`](crate::zone::Zone), e.g. `e1z1`.
    ZoneId
);

define_string_id!(
    /// Identifier of an [`Order`](crate::order::Order), e.g. `cozy`.
    OrderId
);

define_string_id!(
    /// Identifier of an [`Account`](crate::account::Account), e.g. `admin`.
    AccountId
);

define_string_id!(
    /// Identifier of a [`HardwareType`](crate::hardware::HardwareType), e.g. `M1E1`.
    HardwareId
);

define_numeric_id!(
    /// Identifier of a [`Planning`](crate::planning::Planning).
    PlanningId
);

define_numeric_id!(
    /// Identifier of a [`Slot`](crate::planning::Slot), unique within its planning.
    SlotId
);

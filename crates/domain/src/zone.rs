//! Heating zones and their operating mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{OrderId, PlanningId, ZoneId};

/// How a zone chooses its order.
///
/// On the wire this is a tagged string: `:fixed:<orderId>` or
/// `:planning:<planningId>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ZoneMode {
    Fixed(OrderId),
    Planning(PlanningId),
}

impl ZoneMode {
    #[must_use]
    pub fn planning(&self) -> Option<PlanningId> {
        match self {
            Self::Planning(id) => Some(*id),
            Self::Fixed(_) => None,
        }
    }
}

impl FromStr for ZoneMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidZoneMode(s.to_string());
        let rest = s.strip_prefix(':').ok_or_else(invalid)?;
        let (tag, value) = rest.split_once(':').ok_or_else(invalid)?;
        if value.is_empty() {
            return Err(invalid());
        }
        match tag {
            "fixed" if value.chars().all(|c| c.is_ascii_alphanumeric()) => {
                Ok(Self::Fixed(OrderId::new(value)))
            }
            "planning" if value.chars().all(|c| c.is_ascii_digit()) => value
                .parse()
                .map(|id: u32| Self::Planning(PlanningId::new(id)))
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(order) => write!(f, ":fixed:{order}"),
            Self::Planning(planning) => write!(f, ":planning:{planning}"),
        }
    }
}

impl TryFrom<String> for ZoneMode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneMode> for String {
    fn from(value: ZoneMode) -> Self {
        value.to_string()
    }
}

/// A controllable heating area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    #[serde(alias = "desc")]
    pub description: String,
    pub mode: ZoneMode,
    /// Order in effect right now, computed by the controller.
    pub current: OrderId,
}

/// Partial update of a zone. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ZoneMode>,
}

impl ZonePatch {
    /// Rename a zone. The trimmed description must not be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for a blank description.
    pub fn description(description: &str) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            description: Some(description.to_string()),
            mode: None,
        })
    }

    #[must_use]
    pub fn mode(mode: ZoneMode) -> Self {
        Self {
            description: None,
            mode: Some(mode),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.mode.is_none()
    }
}

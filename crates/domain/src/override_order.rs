//! Global override applied above every zone mode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::OrderId;

/// Wire value meaning "no override".
pub const NO_OVERRIDE: &str = "none";

/// Either no override, or an order forced on every zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Override {
    #[default]
    None,
    Order(OrderId),
}

impl Override {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value == NO_OVERRIDE || value.is_empty() {
            Self::None
        } else {
            Self::Order(OrderId::new(value))
        }
    }

    #[must_use]
    pub fn order(&self) -> Option<&OrderId> {
        match self {
            Self::None => None,
            Self::Order(id) => Some(id),
        }
    }

    /// Value used for form fields and the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => NO_OVERRIDE,
            Self::Order(id) => id.as_str(),
        }
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Override {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Override> for String {
    fn from(value: Override) -> Self {
        value.as_str().to_string()
    }
}

/// `{"override": "<id|none>"}` as exchanged with the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideBody {
    #[serde(rename = "override")]
    pub value: Override,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_none() {
        assert_eq!(Override::parse("none"), Override::None);
        assert_eq!(Override::parse(""), Override::None);
    }

    #[test]
    fn should_roundtrip_wire_body() {
        let body: OverrideBody = serde_json::from_str(r#"{"override":"cozyminus1"}"#).unwrap();
        assert_eq!(body.value, Override::Order(OrderId::new("cozyminus1")));
        assert_eq!(
            serde_json::to_string(&OverrideBody::default()).unwrap(),
            r#"{"override":"none"}"#
        );
    }
}

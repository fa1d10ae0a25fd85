//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`OfpError`]
//! via `#[from]`. Errors that reach the user (HTTP and network failures)
//! carry a localized, human-readable message in their `Display` impl.

use std::fmt;

/// Top-level error for every operation against the heating controller.
#[derive(Debug, thiserror::Error)]
pub enum OfpError {
    /// User input or payload rejected before (or instead of) being applied.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The controller answered with a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The controller could not be reached.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The controller answered with a body that could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Domain invariant violations and rejected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("invalid account id {0:?}")]
    InvalidAccountId(String),

    #[error("account {0:?} already exists")]
    AccountExists(String),

    #[error("the administrator account cannot be deleted")]
    UndeletableAdmin,

    #[error("invalid zone mode {0:?}")]
    InvalidZoneMode(String),

    #[error("invalid day of week {0}")]
    InvalidDayOfWeek(u8),

    #[error("invalid hour {0}")]
    InvalidHour(u8),

    #[error("invalid minute {0}")]
    InvalidMinute(u8),

    #[error("unknown order {0:?}")]
    UnknownOrder(String),

    #[error("unknown planning {0}")]
    UnknownPlanning(u32),

    #[error("invalid value {value:?} for parameter {id:?}")]
    InvalidParameterValue { id: String, value: String },

    #[error("too many {what} (maximum {max})")]
    LimitReached { what: &'static str, max: usize },

    #[error("invalid firmware image: {0}")]
    InvalidFirmware(&'static str),

    #[error("invalid certificate bundle: {0}")]
    InvalidCertificate(&'static str),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// HTTP verbs used against the controller REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case verb as sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Localized prefix shown to the user when a request with this verb fails.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Get => "Erreur lors de la récupération",
            Self::Post => "Erreur lors de la création",
            Self::Put => "Erreur lors de la mise à jour",
            Self::Patch => "Erreur lors de la mise à jour partielle",
            Self::Delete => "Erreur lors de la suppression",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-2xx answer from the controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} {url} : {status}", .method.failure_message())]
pub struct HttpError {
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
}

/// Transport-level failure (connection refused, timeout, TLS, ...).
#[derive(Debug, thiserror::Error)]
#[error("{} {url} : {source}", .method.failure_message())]
pub struct NetworkError {
    pub method: HttpMethod,
    pub url: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// The response body did not match the expected JSON shape.
#[derive(Debug, thiserror::Error)]
#[error("Réponse invalide {url} : {source}")]
pub struct DecodeError {
    pub url: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_localize_http_error_by_method() {
        let err = HttpError {
            method: HttpMethod::Get,
            url: "/ofp-api/v1/zones".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "Erreur lors de la récupération /ofp-api/v1/zones : 500"
        );
    }

    #[test]
    fn should_use_partial_update_wording_for_patch() {
        let err = OfpError::from(HttpError {
            method: HttpMethod::Patch,
            url: "/ofp-api/v1/zones/e1z1".to_string(),
            status: 400,
        });
        assert_eq!(
            err.to_string(),
            "Erreur lors de la mise à jour partielle /ofp-api/v1/zones/e1z1 : 400"
        );
    }

    #[test]
    fn should_include_cause_in_network_error() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = NetworkError {
            method: HttpMethod::Delete,
            url: "/ofp-api/v1/plannings/2".to_string(),
            source: Box::new(cause),
        };
        assert_eq!(
            err.to_string(),
            "Erreur lors de la suppression /ofp-api/v1/plannings/2 : refused"
        );
    }

    #[test]
    fn should_display_validation_error_transparently() {
        let err = OfpError::from(ValidationError::UndeletableAdmin);
        assert_eq!(
            err.to_string(),
            "the administrator account cannot be deleted"
        );
    }

    #[test]
    fn should_display_not_found_error() {
        let err = NotFoundError {
            entity: "Planning",
            id: "7".to_string(),
        };
        assert_eq!(err.to_string(), "Planning 7 not found");
    }
}

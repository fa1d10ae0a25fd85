//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use ofp_domain::error::OfpError;

/// JSON error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`OfpError`] to an HTTP response with the status the firmware uses.
pub struct ApiError(OfpError);

impl From<OfpError> for ApiError {
    fn from(err: OfpError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            OfpError::Validation(_) => StatusCode::BAD_REQUEST,
            OfpError::NotFound(_) => StatusCode::NOT_FOUND,
            OfpError::Http(err) => {
                StatusCode::from_u16(err.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            OfpError::Network(_) | OfpError::Decode(_) => {
                tracing::error!(error = %self.0, "mock controller failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use ofp_domain::error::{HttpError, HttpMethod, NotFoundError, ValidationError};

    use super::*;

    fn status_of(err: impl Into<OfpError>) -> StatusCode {
        ApiError(err.into()).into_response().status()
    }

    #[test]
    fn should_map_errors_to_status_codes() {
        assert_eq!(
            status_of(ValidationError::UndeletableAdmin),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(NotFoundError {
                entity: "Zone",
                id: "e9z9".to_string(),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(HttpError {
                method: HttpMethod::Get,
                url: "/ofp-api/v1/zones".to_string(),
                status: 503,
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}

//! Errors raised by the dashboard handlers themselves.
//!
//! Controller failures never show up here: they go to the error panel and
//! the page is rendered anyway. What is left is a browser sending a request
//! the dashboard cannot read.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("formulaire illisible : {0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "rejected dashboard request");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

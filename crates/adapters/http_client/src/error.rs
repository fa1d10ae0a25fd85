//! Client construction errors.

/// Errors raised while building an [`HttpClient`](crate::HttpClient).
///
/// Request failures never use this type: they are reported as
/// [`OfpError`](ofp_domain::error::OfpError) directly.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL is not an absolute `http(s)` URL.
    #[error("invalid controller url {0:?}")]
    InvalidBaseUrl(String),

    /// The underlying reqwest client could not be created.
    #[error("unable to build http client")]
    Build(#[from] reqwest::Error),
}

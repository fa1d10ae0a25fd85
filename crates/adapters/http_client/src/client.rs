//! The HTTP helper: one `send` path plus a method-specific helper per body kind.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use ofp_domain::error::{DecodeError, HttpError, HttpMethod, NetworkError, OfpError};

use crate::error::ClientError;

/// Canonical API prefix of the controller firmware.
pub const DEFAULT_API_PREFIX: &str = "/ofp-api/v1";

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const PEM_FILE: &str = "application/x-pem-file";

/// Configuration for the controller HTTP client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Controller origin, e.g. `http://192.168.1.10`.
    pub base_url: String,
    /// Path prefix of every endpoint.
    pub api_prefix: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Build an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the base URL is not `http(s)` or the
    /// underlying client cannot be built.
    pub fn build(self) -> Result<HttpClient, ClientError> {
        let base_url = self.base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(self.base_url));
        }
        let prefix = self.api_prefix.trim_end_matches('/');
        let prefix = if prefix.is_empty() || prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(HttpClient {
            client,
            base_url: base_url.to_string(),
            api_prefix: prefix,
        })
    }
}

/// Typed access to the controller REST API.
///
/// Cheap to share behind an `Arc`; the inner reqwest client pools
/// connections.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    api_prefix: String,
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

impl HttpClient {
    /// API path of an endpoint, as shown in error messages.
    #[must_use]
    pub fn path(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.api_prefix)
    }

    /// Absolute URL of an endpoint.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, self.path(endpoint))
    }

    /// Issue one request and check its status. No retries.
    async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<reqwest::Response, OfpError> {
        let path = self.path(endpoint);
        let url = self.url(endpoint);
        tracing::debug!(%method, %url, "controller request");

        let request = body(self.client.request(reqwest_method(method), &url));
        let response = request.send().await.map_err(|err| {
            tracing::warn!(%method, %url, error = %err, "controller unreachable");
            NetworkError {
                method,
                url: path.clone(),
                source: Box::new(err),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "controller rejected request");
            return Err(HttpError {
                method,
                url: path,
                status: status.as_u16(),
            }
            .into());
        }
        Ok(response)
    }

    async fn read_body(
        &self,
        method: HttpMethod,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<Vec<u8>, OfpError> {
        match response.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(err) => Err(NetworkError {
                method,
                url: self.path(endpoint),
                source: Box::new(err),
            }
            .into()),
        }
    }

    /// `GET` an endpoint and decode its JSON body.
    ///
    /// # Errors
    ///
    /// [`OfpError::Http`], [`OfpError::Network`] or [`OfpError::Decode`].
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, OfpError> {
        let response = self.send(HttpMethod::Get, endpoint, |req| req).await?;
        let bytes = self.read_body(HttpMethod::Get, endpoint, response).await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!(endpoint, error = %err, "undecodable controller answer");
            OfpError::from(DecodeError {
                url: self.path(endpoint),
                source: Box::new(err),
            })
        })
    }

    /// `GET` an endpoint and return its body as text.
    ///
    /// # Errors
    ///
    /// [`OfpError::Http`] or [`OfpError::Network`].
    pub async fn get_text(&self, endpoint: &str) -> Result<String, OfpError> {
        let response = self.send(HttpMethod::Get, endpoint, |req| req).await?;
        let bytes = self.read_body(HttpMethod::Get, endpoint, response).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// # Errors
    ///
    /// [`OfpError::Http`] or [`OfpError::Network`].
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<(), OfpError> {
        self.send(HttpMethod::Post, endpoint, |req| req.json(body))
            .await
            .map(drop)
    }

    /// # Errors
    ///
    /// [`OfpError::Http`] or [`OfpError::Network`].
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<(), OfpError> {
        self.send(HttpMethod::Put, endpoint, |req| req.json(body))
            .await
            .map(drop)
    }

    /// # Errors
    ///
    /// [`OfpError::Http`] or [`OfpError::Network`].
    pub async fn patch_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<(), OfpError> {
        self.send(HttpMethod::Patch, endpoint, |req| req.json(body))
            .await
            .map(drop)
    }

    /// # Errors
    ///
    /// [`OfpError::Http`] or [`OfpError::Network`].
    pub async fn delete(&self, endpoint: &str) -> Result<(), OfpError> {
        self.send(HttpMethod::Delete, endpoint, |req| req)
            .await
            .map(drop)
    }

    /// `POST` a raw payload with an explicit content type.
    ///
    /// # Errors
    ///
    /// [`OfpError::Http`] or [`OfpError::Network`].
    pub async fn post_bytes(
        &self,
        endpoint: &str,
        content_type: &'static str,
        bytes: Vec<u8>,
    ) -> Result<(), OfpError> {
        self.send(HttpMethod::Post, endpoint, |req| {
            req.header(reqwest::header::CONTENT_TYPE, content_type)
                .body(bytes)
        })
        .await
        .map(drop)
    }

    /// `POST` an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// [`OfpError::Http`] or [`OfpError::Network`].
    pub async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<(), OfpError> {
        self.send(HttpMethod::Post, endpoint, |req| req.form(fields))
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, api_prefix: &str) -> HttpClient {
        Config {
            base_url: base_url.to_string(),
            api_prefix: api_prefix.to_string(),
            timeout: Duration::from_secs(1),
        }
        .build()
        .unwrap()
    }

    #[test]
    fn should_join_base_url_prefix_and_endpoint() {
        let client = client("http://192.168.1.10/", "/ofp-api/v1/");
        assert_eq!(client.path("/zones"), "/ofp-api/v1/zones");
        assert_eq!(
            client.url("/zones/e1z1"),
            "http://192.168.1.10/ofp-api/v1/zones/e1z1"
        );
    }

    #[test]
    fn should_normalize_prefix_without_leading_slash() {
        let client = client("https://ofp.local", "api/v1");
        assert_eq!(client.url("/status"), "https://ofp.local/api/v1/status");
    }

    #[test]
    fn should_reject_non_http_base_url() {
        let result = Config {
            base_url: "ofp.local:80".to_string(),
            ..Config::default()
        }
        .build();
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn should_report_network_error_with_localized_message() {
        // port 1 is never served on the loopback interface of a test machine
        let client = client("http://127.0.0.1:1", DEFAULT_API_PREFIX);
        let err = client.delete("/plannings/3").await.unwrap_err();
        assert!(matches!(err, OfpError::Network(_)));
        assert!(
            err.to_string()
                .starts_with("Erreur lors de la suppression /ofp-api/v1/plannings/3 : ")
        );
    }
}

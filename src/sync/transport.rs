//! HTTP retrieval boundary.
//!
//! The engine only ever talks to the server through the [`Transport`]
//! trait, so tests can script responses without a network.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::Credentials;

/// Typed fetch errors enabling retry classification.
///
/// `NotFound` is deliberately not an error in the retry sense: the server
/// publishes some package kinds only for some periods, so a 404 means
/// "does not exist for this period" and the item is skipped for good.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} does not exist on the server")]
    NotFound { url: String },

    #[error("HTTP status {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("request for {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }

    /// Whether this error is transient and worth retrying. Everything
    /// except a 404 is: non-404 statuses, connection failures, timeouts.
    pub fn is_retryable(&self) -> bool {
        !self.is_not_found()
    }
}

/// One blocking HTTP GET. Implementations authenticate and apply the
/// per-request timeout themselves.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// `reqwest`-backed transport using basic auth.
pub struct HttpTransport {
    client: Client,
    credentials: Credentials,
}

impl HttpTransport {
    pub fn new(credentials: Credentials, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            credentials,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_not_retryable() {
        let e = FetchError::NotFound { url: "x".into() };
        assert!(e.is_not_found());
        assert!(!e.is_retryable());
    }

    #[test]
    fn test_http_500_retryable() {
        let e = FetchError::HttpStatus {
            status: 500,
            url: "x".into(),
        };
        assert!(e.is_retryable());
    }

    #[test]
    fn test_http_403_retryable() {
        // Unlike 404, auth and permission failures get the full retry
        // budget before the cycle gives up.
        let e = FetchError::HttpStatus {
            status: 403,
            url: "x".into(),
        };
        assert!(e.is_retryable());
        assert!(!e.is_not_found());
    }

    #[test]
    fn test_connection_error_retryable() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt
            .block_on(Client::new().get("http://127.0.0.1:1").send())
            .unwrap_err();
        let e = FetchError::Request {
            url: "x".into(),
            source: err,
        };
        assert!(e.is_retryable());
    }
}

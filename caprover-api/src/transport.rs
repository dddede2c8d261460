//! HTTP transport seam.
//!
//! The client describes each call as a plain [`ApiRequest`] and hands it to a
//! [`Transport`], which performs the round-trip and returns an
//! [`ApiResponse`] without interpreting it. The status and body are judged by
//! the client, so a transport only fails when no response arrived at all.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use caprover_core::config::ServerConfig;
use caprover_core::error::{CaproverError, CaproverResult};

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON-encoded body, if any.
    pub body: Option<Vec<u8>>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Executes one HTTP round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return whatever the server answered.
    ///
    /// Implementations must return `Ok` for every status code and reserve
    /// `Err` for requests that never produced a response.
    async fn send(&self, request: ApiRequest) -> CaproverResult<ApiResponse>;
}

/// Production transport backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Build a transport from server configuration.
    pub fn new(config: &ServerConfig) -> CaproverResult<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.api_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms));

        // Handle self-signed certificates
        if config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| CaproverError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner })
    }

    /// Classify a reqwest error into a transport error message.
    fn classify_error(e: reqwest::Error) -> CaproverError {
        if e.is_timeout() {
            CaproverError::Transport(format!("request timed out: {e}"))
        } else if e.is_connect() {
            CaproverError::Transport(format!("connection failed: {e}"))
        } else {
            CaproverError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> CaproverResult<ApiResponse> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self.inner.request(request.method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Self::classify_error)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| CaproverError::Transport(format!("failed to read response body: {e}")))?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

//! Authenticated client for the CapRover control-plane API.
//!
//! Owns the session (endpoint, password, token) and the request dispatch
//! cycle: URL building, fixed headers, JSON encoding, envelope decoding and
//! status interpretation. Endpoint methods live in [`crate::endpoints`].

use std::sync::Arc;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use caprover_core::config::{Config, ServerConfig};
use caprover_core::constants::{headers, paths, NAMESPACE};
use caprover_core::error::{CaproverError, CaproverResult};

use crate::response::Envelope;
use crate::transport::{ApiRequest, ReqwestTransport, Transport};

/// Payload of a successful login.
#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(default)]
    token: String,
}

/// Client bound to one CapRover instance.
///
/// The session token is only written by [`CaproverClient::login`], which
/// takes `&mut self`; a client shared behind `&` or cloned into several
/// tasks therefore always sees a fixed token.
#[derive(Clone)]
pub struct CaproverClient {
    transport: Arc<dyn Transport>,
    /// Base URL, no trailing slash.
    endpoint: String,
    password: String,
    /// Session token; empty until authenticated.
    token: String,
}

impl std::fmt::Debug for CaproverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaproverClient")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl CaproverClient {
    /// Create an unauthenticated client using the reqwest transport.
    pub fn new(config: &ServerConfig) -> CaproverResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(
            &config.endpoint,
            &config.password,
            Arc::new(transport),
        ))
    }

    /// Create an unauthenticated client over a caller-supplied transport.
    pub fn with_transport(endpoint: &str, password: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: Config::sanitize_endpoint(endpoint),
            password: password.to_string(),
            token: String::new(),
        }
    }

    /// Create a client and log in.
    pub async fn connect(config: &ServerConfig) -> CaproverResult<Self> {
        let mut client = Self::new(config)?;
        client.login().await?;
        Ok(client)
    }

    /// Get the base endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the session token (empty before login).
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether a login has succeeded on this client.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Build the absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Build the absolute URL for an API path with percent-encoded query pairs.
    pub fn url_with_query(&self, path: &str, query: &[(&str, &str)]) -> CaproverResult<String> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| CaproverError::Config(format!("invalid endpoint URL {}: {e}", self.endpoint)))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url.into())
    }

    /// Headers attached to every request.
    fn headers(&self) -> Vec<(String, String)> {
        let mut out = vec![
            (headers::CONTENT_TYPE.into(), headers::CONTENT_TYPE_JSON.into()),
            (headers::ACCEPT.into(), headers::ACCEPT_ANY.into()),
            (headers::NAMESPACE.into(), NAMESPACE.into()),
        ];
        if !self.token.is_empty() {
            out.push((headers::AUTH.into(), self.token.clone()));
        }
        out
    }

    /// Internal: describe a request for the given method, absolute URL and optional JSON body.
    fn build_request(
        &self,
        method: Method,
        url: String,
        body: Option<&serde_json::Value>,
    ) -> CaproverResult<ApiRequest> {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| CaproverError::Serialization(e.to_string()))?;

        Ok(ApiRequest {
            method,
            url,
            headers: self.headers(),
            body,
        })
    }

    /// Authenticate with the password and store the returned token.
    ///
    /// Any failure to obtain a token is reported as `Auth`, except a login
    /// body that is not JSON at all, which is a `Decode` error. The stored
    /// token is untouched on failure.
    pub async fn login(&mut self) -> CaproverResult<()> {
        info!("logging in to {}", self.endpoint);

        let body = serde_json::json!({ "password": self.password });
        let request = self.build_request(Method::POST, self.url(paths::LOGIN), Some(&body))?;

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| CaproverError::Auth(format!("login request failed: {e}")))?;

        if response.status != 200 {
            warn!("login rejected with HTTP {}", response.status);
            return Err(CaproverError::Auth(format!(
                "login returned HTTP {}",
                response.status
            )));
        }

        let data: LoginData = decode_envelope(&response.body)?
            .into_data()
            .map_err(|e| match e {
                CaproverError::Remote { description, .. } => CaproverError::Auth(description),
                other => other,
            })?;

        if data.token.is_empty() {
            return Err(CaproverError::Auth("server returned an empty token".into()));
        }

        self.token = data.token;
        debug!("login succeeded");
        Ok(())
    }

    /// Send one request and decode the envelope, without judging its status.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> CaproverResult<Envelope> {
        self.dispatch_url(method, self.url(path), body).await
    }

    /// Like [`CaproverClient::dispatch`], for an already built absolute URL.
    pub async fn dispatch_url(
        &self,
        method: Method,
        url: String,
        body: Option<&serde_json::Value>,
    ) -> CaproverResult<Envelope> {
        let request = self.build_request(method, url, body)?;
        // query strings may carry webhook tokens; keep them out of the log
        let target = without_query(&request.url).to_string();
        let response = self.transport.send(request).await?;
        debug!("{} answered HTTP {}", target, response.status);
        decode_envelope(&response.body)
    }

    /// GET a path and decode the successful envelope's data.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> CaproverResult<T> {
        self.dispatch(Method::GET, path, None).await?.into_data()
    }

    /// POST to a path and require a successful envelope.
    pub async fn post_checked(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> CaproverResult<()> {
        self.post_checked_url(self.url(path), body).await
    }

    /// POST to an absolute URL and require a successful envelope.
    pub async fn post_checked_url(
        &self,
        url: String,
        body: Option<&serde_json::Value>,
    ) -> CaproverResult<()> {
        let target = without_query(&url).to_string();
        let envelope = self.dispatch_url(Method::POST, url, body).await?;
        if let Err(e) = envelope.into_result() {
            warn!("{} failed: {}", target, e);
            return Err(e);
        }
        Ok(())
    }
}

fn without_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// Decode a raw response body into the envelope.
fn decode_envelope(body: &[u8]) -> CaproverResult<Envelope> {
    serde_json::from_slice(body).map_err(|e| {
        let preview: String = String::from_utf8_lossy(body).chars().take(120).collect();
        CaproverError::Decode(format!("malformed response ({e}): {preview}"))
    })
}

//! ApiClient - typed access to the ERP REST API

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ApiStatusError, ErpConfig, ErpError, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client bound to one API base URL.
///
/// Cloning is cheap; the connection pool is shared. A client optionally
/// carries a bearer token, attached to every authenticated call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` with the HTTP client's default timeouts
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url.into(), None)
    }

    /// Create a client from configuration
    pub fn from_config(config: &ErpConfig) -> Result<Self> {
        Self::build(
            config.api_base_url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(transport)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            token: None,
        })
    }

    /// Copy of this client that sends `token` as bearer credential
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            base_url: self.base_url.clone(),
            http: self.http.clone(),
            token: if token.is_empty() { None } else { Some(token) },
        }
    }

    /// Copy of this client without credential
    pub fn anonymous(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            http: self.http.clone(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ============== Request plumbing ==============

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Request carrying the bearer token; fails when the client has none
    pub(crate) fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ErpError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Request that carries the token only when the client has one
    pub(crate) fn maybe_authed(&self, method: Method, path: &str) -> RequestBuilder {
        match self.token.as_deref() {
            Some(token) => self.request(method, path).bearer_auth(token),
            None => self.request(method, path),
        }
    }

    /// Send and turn non-2xx responses into `ApiStatusError`
    pub(crate) async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response> {
        let request_id = uuid::Uuid::new_v4();
        debug!(%request_id, endpoint, "sending request");

        let response = request.send().await.map_err(|e| {
            warn!(%request_id, endpoint, error = %e, "request failed");
            transport(e)
        })?;

        let status = response.status();
        debug!(%request_id, endpoint, status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        let message = if message.trim().is_empty() {
            status.canonical_reason().unwrap_or("Request failed").to_string()
        } else {
            message
        };
        Err(ApiStatusError {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        }
        .into())
    }

    /// Send and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T> {
        let response = self.send(endpoint, request).await?;
        let body = response.text().await.map_err(transport)?;
        decode(endpoint, &body)
    }

    /// Send and return the body as text (many endpoints answer with a message)
    pub(crate) async fn send_text(&self, endpoint: &str, request: RequestBuilder) -> Result<String> {
        let response = self.send(endpoint, request).await?;
        response.text().await.map_err(transport)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.authed(Method::GET, path)?;
        self.send_json(path, request).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.authed(Method::POST, path)?.json(body);
        self.send_json(path, request).await
    }

    pub(crate) async fn post_text<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        let request = self.authed(Method::POST, path)?.json(body);
        self.send_text(path, request).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.authed(Method::PUT, path)?.json(body);
        self.send_json(path, request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<String> {
        let request = self.authed(Method::DELETE, path)?;
        self.send_text(path, request).await
    }
}

/// Decode a JSON body, naming the endpoint on failure
pub fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ErpError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn transport(e: reqwest::Error) -> ErpError {
    if e.is_timeout() {
        ErpError::Transport(format!("request timed out: {}", e))
    } else {
        ErpError::Transport(e.to_string())
    }
}

pub mod auth;
pub mod drafts;
pub mod health;
pub mod organizations;
pub mod plans;
pub mod users;
pub mod variants;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::store::SessionStore;

/// Failure of one API call. Every call either returns its typed payload or
/// one of these; nothing in this layer retries.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),

    /// HTTP 401; callers route this to the login view.
    #[error("not authenticated: {0}")]
    Unauthorized(String),

    /// Any other non-success status, message taken from the backend's error
    /// body when one was parseable.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// HTTP client for the planning backend, one method per resource/action.
///
/// The bearer token is read from the shared session store on every request
/// rather than passed explicitly, so a login in one command is picked up by
/// the next without re-wiring.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send a request and deserialize the success payload.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()));
        }

        Err(Self::error_for(status, response).await)
    }

    /// Send a request whose success response carries no meaningful body.
    async fn send_no_content(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        Err(Self::error_for(status, response).await)
    }

    async fn error_for(status: StatusCode, response: reqwest::Response) -> ClientError {
        let message = Self::extract_message(response).await.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

        if status == StatusCode::UNAUTHORIZED {
            ClientError::Unauthorized(message)
        } else {
            ClientError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Pull a human-readable message out of the backend's error envelope.
    /// Surfaced verbatim in the CLI output, so business-rule rejections read
    /// the way the backend wrote them.
    async fn extract_message(response: reqwest::Response) -> Option<String> {
        let body = response.json::<Value>().await.ok()?;
        for field in ["message", "error", "detail"] {
            if let Some(message) = body.get(field).and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        None
    }
}

//! The rewrite proxy: every request under `/api` is forwarded verbatim to the
//! configured backend origin and the response relayed unchanged. The client
//! never learns the backend's real address.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Upper bound on a buffered request or response body. Matches what the
/// backend accepts; anything larger is rejected before forwarding.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Connection-level headers that must not be forwarded in either direction.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
}

#[derive(Clone)]
pub struct ProxyState {
    http: reqwest::Client,
    backend_url: String,
}

impl ProxyState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.backend.url, config.backend.request_timeout_secs)
    }

    pub fn new(backend_url: &str, request_timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Routes for the public `/api` prefix, all methods forwarded.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/*path", any(forward))
        .route("/api", any(forward))
        .with_state(state)
}

/// Forward one request: method, body, and headers relayed to the backend,
/// response relayed unchanged including status and headers. A transport
/// failure to the backend yields a generic 500 with an error payload; there
/// is no retry.
pub async fn forward(State(state): State<ProxyState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());
    let url = format!("{}{}", state.backend_url, path_and_query);

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::bad_request(format!("failed to read request body: {}", e)).into_response();
        }
    };

    let mut headers = reqwest::header::HeaderMap::new();
    for (name, value) in parts.headers.iter() {
        if !is_hop_by_hop(name.as_str()) {
            headers.append(name.clone(), value.clone());
        }
    }
    let mut builder = state.http.request(parts.method.clone(), &url).headers(headers);
    if !body.is_empty() {
        builder = builder.body(body.to_vec());
    }

    tracing::debug!("forwarding {} {}", parts.method, path_and_query);

    match builder.send().await {
        Ok(response) => relay(response).await,
        Err(e) => {
            tracing::warn!("backend request to {} failed: {}", url, e);
            ApiError::internal_server_error("backend request failed").into_response()
        }
    }
}

async fn relay(response: reqwest::Response) -> Response {
    let status = response.status();
    let headers = response.headers().clone();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("failed to read backend response body: {}", e);
            return ApiError::internal_server_error("backend response could not be read").into_response();
        }
    };

    let mut builder = Response::builder().status(status);
    for (name, value) in headers.iter() {
        if !is_hop_by_hop(name.as_str()) {
            builder = builder.header(name.clone(), value.clone());
        }
    }

    builder
        .body(Body::from(bytes))
        .unwrap_or_else(|e| ApiError::internal_server_error(format!("relay failed: {}", e)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_by_hop_headers_are_recognized_case_insensitively() {
        assert!(is_hop_by_hop("Connection"));
        assert!(is_hop_by_hop("TRANSFER-ENCODING"));
        assert!(!is_hop_by_hop("authorization"));
        assert!(!is_hop_by_hop("content-type"));
    }

    #[test]
    fn backend_url_is_normalized() {
        let state = ProxyState::new("http://localhost:8000/", 5);
        assert_eq!(state.backend_url, "http://localhost:8000");
    }
}

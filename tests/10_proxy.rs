mod common;

use anyhow::Result;
use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use planline::proxy::{self, ProxyState};
use serde_json::{json, Value};

/// A stand-in backend that reflects what it received, so tests can assert the
/// proxy forwarded the request verbatim.
fn echo_backend() -> Router {
    Router::new()
        .route(
            "/api/echo",
            any(|headers: HeaderMap, request: Request| async move {
                let method = request.method().to_string();
                let body = axum::body::to_bytes(request.into_body(), 1024 * 1024)
                    .await
                    .unwrap_or_default();
                let echoed_header = headers
                    .get("x-planline-test")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                (
                    StatusCode::CREATED,
                    [("x-backend-stamp", "echo-v1")],
                    Json(json!({
                        "method": method,
                        "body": String::from_utf8_lossy(&body),
                        "test_header": echoed_header,
                    })),
                )
                    .into_response()
            }),
        )
        .route(
            "/api/missing",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": true, "message": "no such resource" })),
                )
            }),
        )
}

async fn start_proxy(backend_url: &str) -> Result<String> {
    let state = ProxyState::new(backend_url, 5);
    common::serve(proxy::router(state)).await
}

#[tokio::test]
async fn forwards_method_body_and_headers() -> Result<()> {
    let backend_url = common::serve(echo_backend()).await?;
    let proxy_url = start_proxy(&backend_url).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/echo", proxy_url))
        .header("x-planline-test", "carried-through")
        .body("payload bytes")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.headers().get("x-backend-stamp").and_then(|v| v.to_str().ok()),
        Some("echo-v1"),
        "backend response headers must be relayed"
    );

    let body = res.json::<Value>().await?;
    assert_eq!(body["method"], "POST");
    assert_eq!(body["body"], "payload bytes");
    assert_eq!(body["test_header"], "carried-through");
    Ok(())
}

#[tokio::test]
async fn relays_backend_error_statuses_unchanged() -> Result<()> {
    let backend_url = common::serve(echo_backend()).await?;
    let proxy_url = start_proxy(&backend_url).await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/missing", proxy_url)).send().await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "no such resource");
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_yields_generic_500() -> Result<()> {
    let proxy_url = start_proxy(&common::dead_backend_url()?).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/content-plans", proxy_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    Ok(())
}

#[tokio::test]
async fn query_strings_are_forwarded() -> Result<()> {
    let backend = Router::new().route(
        "/api/search",
        get(|request: Request| async move {
            Json(json!({ "query": request.uri().query() }))
        }),
    );
    let backend_url = common::serve(backend).await?;
    let proxy_url = start_proxy(&backend_url).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/search?status=approved&page=2", proxy_url))
        .send()
        .await?;

    let body = res.json::<Value>().await?;
    assert_eq!(body["query"], "status=approved&page=2");
    Ok(())
}

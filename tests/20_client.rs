mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use planline::client::{ApiClient, ClientError};
use planline::store::SessionStore;
use serde_json::{json, Value};

const TOKEN: &str = "test-token-1";
const USER_ID: &str = "6f0c6f9e-2a3b-4c1d-9e8f-1a2b3c4d5e6f";

fn user_json() -> Value {
    json!({
        "id": USER_ID,
        "email": "ana@example.com",
        "name": "Ana",
        "created_at": null,
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

/// Backend double covering the auth flow and a business-rule rejection.
fn backend() -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "ana@example.com" && body["password"] == "hunter2" {
                    Json(json!({ "token": TOKEN, "user": user_json() })).into_response()
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "invalid credentials" })),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/api/users/me",
            get(|headers: HeaderMap| async move {
                if authorized(&headers) {
                    Json(user_json()).into_response()
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "missing or invalid token" })),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/api/content-plans/:id/correlation-rules",
            put(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "message": "Over quota: projected 28 posts exceeds quota of 20" })),
                )
            }),
        )
}

async fn client_against_backend() -> Result<(ApiClient, Arc<SessionStore>)> {
    let backend_url = common::serve(backend()).await?;
    let session = Arc::new(SessionStore::in_memory());
    let client = ApiClient::new(backend_url, Arc::clone(&session));
    Ok((client, session))
}

#[tokio::test]
async fn login_then_me_attaches_bearer_token() -> Result<()> {
    let (client, session) = client_against_backend().await?;

    // Unauthenticated call surfaces as Unauthorized, the login-redirect case.
    let err = client.me().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));

    let response = client.login("ana@example.com", "hunter2").await?;
    session.login(response.token, response.user);
    assert!(session.is_authenticated());

    // Token is read from the shared session store, not passed explicitly.
    let me = client.me().await?;
    assert_eq!(me.email, "ana@example.com");
    Ok(())
}

#[tokio::test]
async fn bad_credentials_surface_backend_message() -> Result<()> {
    let (client, _session) = client_against_backend().await?;

    let err = client.login("ana@example.com", "wrong").await.unwrap_err();
    match err {
        ClientError::Unauthorized(message) => assert_eq!(message, "invalid credentials"),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn business_rule_rejection_is_surfaced_verbatim() -> Result<()> {
    let (client, session) = client_against_backend().await?;
    session.login(
        TOKEN,
        serde_json::from_value(user_json()).expect("valid user fixture"),
    );

    let rules = planline::models::CorrelationRule {
        sm_posts_per_blog: 2,
        brief_based_sm_posts: 5,
        standalone_sm_posts: 3,
        correlation_strength: planline::models::CorrelationStrength::Moderate,
        timing_strategy: planline::models::TimingStrategy::Spread,
    };
    let err = client
        .update_correlation_rules(USER_ID.parse()?, &rules)
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Over quota: projected 28 posts exceeds quota of 20");
        }
        other => panic!("expected Status, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn transport_failure_is_not_an_http_status() -> Result<()> {
    let session = Arc::new(SessionStore::in_memory());
    let client = ApiClient::new(common::dead_backend_url()?, session);

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.status(), None);
    Ok(())
}

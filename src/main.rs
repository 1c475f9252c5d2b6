use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use planline::config;
use planline::proxy::{self, ProxyState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up BACKEND_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!(
        "Starting Planline proxy in {:?} mode, forwarding /api to {}",
        config.environment,
        config.backend.url
    );

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PLANLINE_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Planline proxy listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let config = config::config();
    let state = ProxyState::from_config(config);

    let mut router = Router::new()
        // Local routes; everything under /api is forwarded
        .route("/", get(root))
        .route("/health", get(health))
        .merge(proxy::router(state));

    if config.proxy.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.proxy.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "planline-proxy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness of the proxy itself; backend health is checked through the
/// forwarded /api/health routes.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

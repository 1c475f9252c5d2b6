use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;

/// Serve a router on an unused local port, returning its base URL. The server
/// task runs until the test process exits.
pub async fn serve(router: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("test server error: {}", e);
        }
    });

    Ok(format!("http://{}", addr))
}

/// A base URL guaranteed to have nothing listening, for backend-down cases.
pub fn dead_backend_url() -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(format!("http://127.0.0.1:{}", port))
}

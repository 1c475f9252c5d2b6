use std::path::PathBuf;

/// Where the persisted stores live. `PLAN_CLI_CONFIG_DIR` overrides for
/// tests and sandboxes; otherwise `$HOME/.config/planline/cli`. Returns
/// `None` when neither is available, in which case the stores run in memory.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(custom_dir) = std::env::var("PLAN_CLI_CONFIG_DIR") {
        return Some(PathBuf::from(custom_dir));
    }
    match std::env::var("HOME") {
        Ok(home) => Some(PathBuf::from(home).join(".config").join("planline").join("cli")),
        Err(_) => {
            tracing::warn!("HOME not set; session and organization stores will not persist");
            None
        }
    }
}

/// Base URL the CLI talks to. This is the proxy's public address, not the
/// backend origin; the `/api` prefix is added per request by the client.
pub fn api_base_url() -> String {
    std::env::var("PLAN_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

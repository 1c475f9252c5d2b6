use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub backend: BackendConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Where `/api/*` requests are forwarded. This is the single authoritative
/// backend origin; nothing else in the codebase names a backend host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub enable_cors: bool,
    pub enable_request_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("BACKEND_URL") {
            self.backend.url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("BACKEND_REQUEST_TIMEOUT_SECS") {
            self.backend.request_timeout_secs = v.parse().unwrap_or(self.backend.request_timeout_secs);
        }
        if let Ok(v) = env::var("PROXY_ENABLE_CORS") {
            self.proxy.enable_cors = v.parse().unwrap_or(self.proxy.enable_cors);
        }
        if let Ok(v) = env::var("PROXY_ENABLE_REQUEST_LOGGING") {
            self.proxy.enable_request_logging = v.parse().unwrap_or(self.proxy.enable_request_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            backend: BackendConfig {
                url: "http://localhost:8000".to_string(),
                request_timeout_secs: 30,
            },
            proxy: ProxyConfig {
                enable_cors: true,
                enable_request_logging: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            backend: BackendConfig {
                url: "http://localhost:8000".to_string(),
                request_timeout_secs: 15,
            },
            proxy: ProxyConfig {
                enable_cors: true,
                enable_request_logging: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig {
                // Must be overridden via BACKEND_URL in any real deployment
                url: "http://localhost:8000".to_string(),
                request_timeout_secs: 15,
            },
            proxy: ProxyConfig {
                enable_cors: false,
                enable_request_logging: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults_point_at_localhost_backend() {
        let config = AppConfig::development();
        assert_eq!(config.backend.url, "http://localhost:8000");
        assert!(config.proxy.enable_cors);
    }

    #[test]
    fn production_defaults_disable_cors() {
        let config = AppConfig::production();
        assert!(!config.proxy.enable_cors);
        assert!(!config.proxy.enable_request_logging);
    }
}

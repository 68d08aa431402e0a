//! Server configuration read from environment variables.
//!
//! - `TRACEPAD_HOST`: listen address (default: "127.0.0.1")
//! - `TRACEPAD_PORT`: listen port (default: "3000")
//! - `TRACEPAD_EXECUTOR_URL`: execution service endpoint
//!   (default: "http://127.0.0.1:5000/run")
//! - `TRACEPAD_WORKSPACE`: directory that source import and export are
//!   confined to (default: the working directory)
//! - `TRACEPAD_ALLOWED_ORIGINS`: comma-separated browser origins granted
//!   CORS access (default: none, same-origin only)

use std::path::PathBuf;

use axum::http::HeaderValue;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_EXECUTOR_URL: &str = "http://127.0.0.1:5000/run";
pub const DEFAULT_WORKSPACE: &str = ".";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: '{value}' is not a port number")]
    InvalidPort { var: &'static str, value: String },

    #[error("invalid {var}: '{value}' must start with http:// or https://")]
    InvalidUrl { var: &'static str, value: String },

    #[error("invalid {var}: '{value}' is not an origin like https://host:port")]
    InvalidOrigin { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub executor_url: String,
    pub workspace: PathBuf,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            executor_url: DEFAULT_EXECUTOR_URL.to_string(),
            workspace: PathBuf::from(DEFAULT_WORKSPACE),
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from any variable source (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("TRACEPAD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("TRACEPAD_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: "TRACEPAD_PORT",
                value: value.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let executor_url =
            lookup("TRACEPAD_EXECUTOR_URL").unwrap_or_else(|| DEFAULT_EXECUTOR_URL.to_string());
        if !executor_url.starts_with("http://") && !executor_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl {
                var: "TRACEPAD_EXECUTOR_URL",
                value: executor_url,
            });
        }

        let workspace = PathBuf::from(
            lookup("TRACEPAD_WORKSPACE").unwrap_or_else(|| DEFAULT_WORKSPACE.to_string()),
        );

        let allowed_origins = match lookup("TRACEPAD_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(parse_origin)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(ServerConfig {
            host,
            port,
            executor_url,
            workspace,
            allowed_origins,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue, ConfigError> {
    let invalid = || ConfigError::InvalidOrigin {
        var: "TRACEPAD_ALLOWED_ORIGINS",
        value: origin.to_string(),
    };
    if origin == "*" || !(origin.starts_with("http://") || origin.starts_with("https://")) {
        return Err(invalid());
    }
    HeaderValue::from_str(origin).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRACEPAD_HOST", "0.0.0.0"),
            ("TRACEPAD_PORT", "8080"),
            ("TRACEPAD_EXECUTOR_URL", "https://sandbox.local/run"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.executor_url, "https://sandbox.local/run");
    }

    #[test]
    fn reads_workspace_and_origins() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRACEPAD_WORKSPACE", "/srv/playground"),
            (
                "TRACEPAD_ALLOWED_ORIGINS",
                "http://localhost:5173, https://pad.example.com,",
            ),
        ]))
        .unwrap();
        assert_eq!(config.workspace, PathBuf::from("/srv/playground"));
        assert_eq!(
            config.allowed_origins,
            vec![
                HeaderValue::from_static("http://localhost:5173"),
                HeaderValue::from_static("https://pad.example.com"),
            ]
        );
    }

    #[test]
    fn rejects_wildcard_origin() {
        for value in ["*", "localhost:5173"] {
            assert!(matches!(
                ServerConfig::from_lookup(lookup(&[("TRACEPAD_ALLOWED_ORIGINS", value)])),
                Err(ConfigError::InvalidOrigin { .. })
            ));
        }
    }

    #[test]
    fn rejects_bad_port() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("TRACEPAD_PORT", "http")])),
            Err(ConfigError::InvalidPort { .. })
        ));
    }

    #[test]
    fn rejects_non_http_executor() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("TRACEPAD_EXECUTOR_URL", "ftp://x")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}

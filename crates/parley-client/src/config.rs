//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration against a local backend.

use std::path::PathBuf;
use std::time::Duration;

use parley_api::ApiConfig;
use parley_shared::constants::{
    DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root URL.
    /// Env: `PARLEY_API_URL`
    /// Default: `http://localhost:3000`
    pub api_url: String,

    /// Env: `PARLEY_CONNECT_TIMEOUT_SECS`
    /// Default: `30`
    pub connect_timeout: Duration,

    /// Env: `PARLEY_REQUEST_TIMEOUT_SECS`
    /// Default: `30`
    pub request_timeout: Duration,

    /// Log HTTP bodies at trace level. Keep off in production builds,
    /// bodies carry message content.
    /// Env: `PARLEY_LOG_HTTP_BODIES` (true/false)
    /// Default: `false`
    pub log_http_bodies: bool,

    /// Directory holding the preference database.
    /// Env: `PARLEY_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_http_bodies: false,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("PARLEY_API_URL") {
            if url.starts_with("http://") || url.starts_with("https://") {
                config.api_url = url;
            } else {
                tracing::warn!(value = %url, "Invalid PARLEY_API_URL, using default");
            }
        }

        if let Some(secs) = lookup("PARLEY_CONNECT_TIMEOUT_SECS") {
            match parse_secs(&secs) {
                Some(d) => config.connect_timeout = d,
                None => tracing::warn!(value = %secs, "Invalid PARLEY_CONNECT_TIMEOUT_SECS, using default"),
            }
        }

        if let Some(secs) = lookup("PARLEY_REQUEST_TIMEOUT_SECS") {
            match parse_secs(&secs) {
                Some(d) => config.request_timeout = d,
                None => tracing::warn!(value = %secs, "Invalid PARLEY_REQUEST_TIMEOUT_SECS, using default"),
            }
        }

        if let Some(val) = lookup("PARLEY_LOG_HTTP_BODIES") {
            config.log_http_bodies = val == "true" || val == "1";
        }

        if let Some(dir) = lookup("PARLEY_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            log_bodies: self.log_http_bodies,
        }
    }
}

/// Positive whole seconds.
fn parse_secs(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(Duration::from_secs(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(entries: &[(&str, &str)]) -> ClientConfig {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = from_map(&[]);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(!config.api_config().log_bodies);
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("PARLEY_API_URL", "https://chat.example.com"),
            ("PARLEY_REQUEST_TIMEOUT_SECS", "10"),
            ("PARLEY_LOG_HTTP_BODIES", "1"),
            ("PARLEY_DATA_DIR", "/tmp/parley"),
        ]);
        assert_eq!(config.api_url, "https://chat.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.log_http_bodies);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/parley")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = from_map(&[
            ("PARLEY_API_URL", "ftp://nope"),
            ("PARLEY_CONNECT_TIMEOUT_SECS", "0"),
            ("PARLEY_REQUEST_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(config, ClientConfig::default());
    }
}

//! Server configuration from environment variables.

use crate::catalog::OMDB_DEFAULT_BASE_URL;
use std::time::Duration;

/// Everything the web binary reads from its environment. Unset or unparseable
/// values fall back to the defaults.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppConfig {
    /// `HOST`, default 0.0.0.0 so the app is reachable on a VPS.
    pub host: String,
    /// `PORT`, default 8080.
    pub port: u16,
    /// `OMDB_API_KEY`; empty means searches come back empty.
    pub omdb_api_key: String,
    /// `OMDB_BASE_URL`, default https://www.omdbapi.com.
    pub omdb_base_url: String,
    /// `SEARCH_DEBOUNCE_MS`, default 300.
    pub search_debounce: Duration,
    /// `SESSION_TIMEOUT_HOURS`, default 12.
    pub session_timeout: Duration,
    /// `PLAYOFF_SHUFFLE_SEED`: fixed seed for reproducible shuffles.
    pub shuffle_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            omdb_api_key: String::new(),
            omdb_base_url: OMDB_DEFAULT_BASE_URL.to_string(),
            search_debounce: Duration::from_millis(300),
            session_timeout: Duration::from_secs(12 * 3600),
            shuffle_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key -> value lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            omdb_api_key: get("OMDB_API_KEY").unwrap_or(defaults.omdb_api_key),
            omdb_base_url: get("OMDB_BASE_URL").unwrap_or(defaults.omdb_base_url),
            search_debounce: get("SEARCH_DEBOUNCE_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            session_timeout: get("SESSION_TIMEOUT_HOURS")
                .and_then(|v| v.parse::<u64>().ok())
                .and_then(|h| h.checked_mul(3600))
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_timeout),
            shuffle_seed: get("PLAYOFF_SHUFFLE_SEED").and_then(|v| v.parse().ok()),
        }
    }
}

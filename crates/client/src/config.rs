use std::{env, time::Duration};

use campsync_core::cache::CacheSettings;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (default: "http://localhost:8080")
    pub base_url: String,
    /// Bearer token for authenticated requests
    pub token: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Request cache settings
    pub cache: CacheSettings,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CAMPSYNC_URL` - API base URL (default: "http://localhost:8080")
    /// - `CAMPSYNC_TOKEN` - bearer token (default: none)
    /// - `CAMPSYNC_TIMEOUT_SECS` - request timeout (default: 30)
    /// - `CAMPSYNC_CACHE_*` - see [`CacheSettings::from_env`]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            base_url: lookup("CAMPSYNC_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: lookup("CAMPSYNC_TOKEN").filter(|token| !token.is_empty()),
            timeout_secs: lookup("CAMPSYNC_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            cache: CacheSettings::from_lookup(&lookup),
        }
    }

    /// Configuration for `base_url` with every other value at its default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache: CacheSettings::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_cache(mut self, cache: CacheSettings) -> Self {
        self.cache = cache;
        self
    }

    /// Get request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

//! HTTP client for the campsync API.
//!
//! Every `GET` against a camp-scoped entity goes through the request cache;
//! every successful mutation invalidates the cached reads of its entity type
//! before returning.

pub mod account;
pub mod events;
pub mod resources;

use std::sync::Arc;

use campsync_core::cache::{
    compute_key, entity_type_from_path, CacheKey, CacheSettings, CacheStats, Clock, RequestCache,
    SystemClock,
};
use reqwest::Method;
use serde::de::IgnoredAny;
use tokio::sync::Mutex;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// HTTP client for the campsync API.
///
/// Clones share the HTTP connection pool, the cache and the current token.
pub struct CampsyncClient<C: Clock = SystemClock> {
    http: reqwest::Client,
    base_url: String,
    /// The cache's identity doubles as the bearer token.
    cache: Arc<Mutex<RequestCache<String, C>>>,
    settings: Arc<CacheSettings>,
}

impl<C: Clock> Clone for CampsyncClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            cache: Arc::clone(&self.cache),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl CampsyncClient<SystemClock> {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// Create from environment (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }
}

impl<C: Clock> CampsyncClient<C> {
    /// Create a client whose cache reads time from `clock`.
    pub fn with_clock(config: ClientConfig, clock: C) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        let mut cache = RequestCache::from_settings(&config.cache, clock);
        cache.set_identity(config.token.as_deref());

        Ok(Self {
            http,
            base_url: config.base_url,
            cache: Arc::new(Mutex::new(cache)),
            settings: Arc::new(config.cache),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the bearer token. A different token clears the cache.
    pub async fn set_token(&self, token: Option<String>) {
        let mut cache = self.cache.lock().await;
        if cache.set_identity(token.as_deref()) {
            tracing::info!(authenticated = token.is_some(), "Token changed, request cache cleared");
        }
    }

    /// Forget the token and drop every cached payload.
    ///
    /// Returns the number of cached entries that were dropped.
    pub async fn logout(&self) -> usize {
        let mut cache = self.cache.lock().await;
        let cleared = cache.clear_all();
        cache.set_identity(None);
        tracing::info!(cleared, "Logged out");
        cleared
    }

    pub async fn token(&self) -> Option<String> {
        self.cache.lock().await.current_identity().map(str::to_string)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    pub async fn reset_cache_stats(&self) {
        self.cache.lock().await.reset_stats();
    }

    /// Drop every cached payload. Returns the number of removed entries.
    pub async fn clear_cache(&self) -> usize {
        self.cache.lock().await.clear_all()
    }

    /// Build a URL for an API path with optional query pairs.
    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    /// `GET` through the request cache, returning the raw JSON body.
    ///
    /// Requests without a camp-scoped entity type, or for an entity type with
    /// caching disabled, go straight to the network. Only well-formed JSON
    /// bodies are stored.
    async fn get_cached(&self, url: Url) -> Result<String> {
        let cache_target = entity_type_from_path(url.path())
            .filter(|entity_type| self.settings.is_caching_enabled(entity_type))
            .map(str::to_string);

        let Some(entity_type) = cache_target else {
            let token = self.token().await;
            return self.send(Method::GET, url, token.as_deref(), None).await;
        };

        let (token, key) = {
            let mut cache = self.cache.lock().await;
            let token = cache.current_identity().map(str::to_string);
            let key = match compute_key(Method::GET.as_str(), url.as_str(), token.as_deref()) {
                Ok(key) => key,
                Err(err) => {
                    tracing::warn!(url = %url, error = %err, "Failed to compute cache key");
                    drop(cache);
                    return self.send(Method::GET, url, token.as_deref(), None).await;
                }
            };
            if let Some(body) = cache.lookup(&key) {
                tracing::debug!(entity_type = %entity_type, key = %key, "Serving cached response");
                return Ok(body);
            }
            (token, key)
        };

        let body = self
            .send(Method::GET, url, token.as_deref(), None)
            .await?;
        self.store_response(key, &entity_type, token.as_deref(), &body)
            .await;
        Ok(body)
    }

    async fn store_response(
        &self,
        key: CacheKey,
        entity_type: &str,
        token: Option<&str>,
        body: &str,
    ) {
        if let Err(err) = serde_json::from_str::<IgnoredAny>(body) {
            tracing::warn!(key = %key, error = %err, "Response is not JSON, not caching");
            return;
        }

        let mut cache = self.cache.lock().await;
        // The token may have changed while the request was in flight.
        if cache.current_identity() != token {
            tracing::debug!(key = %key, "Identity changed during request, not caching");
            return;
        }
        cache.store(key, body.to_string(), self.settings.ttl_for(entity_type));
    }

    /// `POST`/`PUT`/`DELETE`, invalidating the entity type on success.
    async fn mutate(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<String> {
        let token = self.token().await;
        let entity_type = entity_type_from_path(url.path()).map(str::to_string);

        let response = self.send(method, url, token.as_deref(), body).await?;

        if let Some(entity_type) = entity_type {
            let removed = self
                .cache
                .lock()
                .await
                .invalidate_entity_type(&entity_type);
            tracing::debug!(entity_type = %entity_type, removed, "Invalidated after mutation");
        }
        Ok(response)
    }

    /// Perform a request and return the body of a successful response.
    async fn send(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> Result<String> {
        let resource = url.path().to_string();
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut request = self.http.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response, resource).await
    }

    /// Handle error responses.
    async fn handle_response(&self, response: reqwest::Response, resource: String) -> Result<String> {
        let status = response.status();
        if status.is_success() {
            response.text().await.map_err(ClientError::from)
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound { resource })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

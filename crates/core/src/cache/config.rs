use std::collections::HashMap;
use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{CacheError, Result};

/// TTL applied to entity types that have no explicit entry (30 seconds).
pub const DEFAULT_CACHE_TTL_MS: u64 = 30_000;

/// Caching behavior for a single entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCacheConfig {
    /// Time to live in milliseconds. Always greater than zero.
    pub ttl_ms: u64,
    pub enabled: bool,
}

impl EntityCacheConfig {
    /// Creates an enabled configuration with the given TTL.
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms: ttl_ms.max(1),
            enabled: true,
        }
    }

    /// Returns a copy of this configuration with caching disabled.
    pub fn disabled(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }

    /// TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

/// Default per-entity TTLs in milliseconds.
const DEFAULT_ENTITY_TTLS: &[(&str, u64)] = &[
    // Core entities
    ("campers", 60_000),
    ("groups", 30_000),
    ("staff-members", 60_000),
    // Programs
    ("programs", 30_000),
    ("activities", 30_000),
    ("events", 30_000),
    // Locations
    ("locations", 120_000),
    ("areas", 120_000),
    ("housing-rooms", 120_000),
    // Configuration entities change rarely
    ("sessions", 120_000),
    ("roles", 120_000),
    ("colors", 120_000),
    ("labels", 120_000),
    ("certifications", 120_000),
    ("time-blocks", 120_000),
];

/// Cache configuration: global switch, default TTL, optional size bound
/// and the per-entity TTL table.
///
/// Loaded once at startup and immutable once a cache has been built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Global enable/disable switch.
    pub enabled: bool,
    /// TTL for entity types missing from the table.
    pub default_ttl_ms: u64,
    /// Maximum number of entries before LRU eviction. `None` means unbounded.
    pub max_entries: Option<usize>,
    entities: HashMap<String, EntityCacheConfig>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let entities = DEFAULT_ENTITY_TTLS
            .iter()
            .map(|(name, ttl)| (name.to_string(), EntityCacheConfig::new(*ttl)))
            .collect();
        Self {
            enabled: true,
            default_ttl_ms: DEFAULT_CACHE_TTL_MS,
            max_entries: None,
            entities,
        }
    }
}

impl CacheSettings {
    /// Load settings from environment variables on top of the defaults.
    ///
    /// Environment variables:
    /// - `CAMPSYNC_CACHE_ENABLED` - `true`/`false`/`1`/`0` (default: true)
    /// - `CAMPSYNC_CACHE_DEFAULT_TTL_MS` - default TTL (default: 30000)
    /// - `CAMPSYNC_CACHE_MAX_ENTRIES` - LRU bound (default: unbounded)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`CacheSettings::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            enabled: lookup("CAMPSYNC_CACHE_ENABLED")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.enabled),
            default_ttl_ms: lookup("CAMPSYNC_CACHE_DEFAULT_TTL_MS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.default_ttl_ms),
            max_entries: lookup("CAMPSYNC_CACHE_MAX_ENTRIES")
                .and_then(|v| v.trim().parse().ok())
                .filter(|max| *max > 0),
            entities: defaults.entities,
        }
    }

    /// Sets the configuration for an entity type.
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        ttl_ms: u64,
        enabled: bool,
    ) -> Result<Self> {
        let entity_type = entity_type.into();
        if ttl_ms == 0 {
            return Err(CacheError::InvalidTtl { entity_type });
        }
        self.entities
            .insert(entity_type, EntityCacheConfig { ttl_ms, enabled });
        Ok(self)
    }

    /// Sets the LRU bound.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.filter(|max| *max > 0);
        self
    }

    /// Turns caching off globally.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Configuration for an entity type, falling back to the default TTL.
    pub fn entity_config(&self, entity_type: &str) -> EntityCacheConfig {
        self.entities
            .get(entity_type)
            .copied()
            .unwrap_or_else(|| EntityCacheConfig::new(self.default_ttl_ms))
    }

    /// Returns true if responses for `entity_type` may be cached.
    pub fn is_caching_enabled(&self, entity_type: &str) -> bool {
        self.enabled && self.entity_config(entity_type).enabled
    }

    /// TTL in milliseconds for `entity_type`.
    pub fn ttl_for(&self, entity_type: &str) -> u64 {
        self.entity_config(entity_type).ttl_ms
    }

    /// Entity types with an explicit entry, sorted by name.
    pub fn configured_entities(&self) -> Vec<(&str, EntityCacheConfig)> {
        let mut entities: Vec<(&str, EntityCacheConfig)> = self
            .entities
            .iter()
            .map(|(name, config)| (name.as_str(), *config))
            .collect();
        entities.sort_by(|a, b| a.0.cmp(b.0));
        entities
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

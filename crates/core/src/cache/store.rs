//! In-memory request cache with TTL expiry and token-based invalidation.
//!
//! Entries are checked against the injected [`Clock`] on every lookup and
//! evicted lazily once expired. Mutations of an entity type invalidate every
//! key whose path contains `/{entity}`, and a change of identity
//! clears the whole store so a payload is never served to a different
//! principal than the one it was fetched for.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::Serialize;

use super::{CacheKey, CacheSettings, Clock, SystemClock};

/// A cached payload with the time it was stored.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    payload: V,
    stored_at_ms: i64,
    ttl_ms: u64,
}

impl<V> CacheEntry<V> {
    /// An entry is valid iff `now - stored_at < ttl`.
    fn is_valid(&self, now_ms: i64) -> bool {
        let ttl = i64::try_from(self.ttl_ms).unwrap_or(i64::MAX);
        now_ms.saturating_sub(self.stored_at_ms) < ttl
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    hits: u64,
    misses: u64,
    invalidations: u64,
}

/// Read-only snapshot of cache activity for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub size: usize,
    /// Rendered keys currently stored, sorted.
    pub entries: Vec<String>,
}

/// Per-session request cache.
///
/// Unbounded by default; when built with a maximum size the least recently
/// used entry is dropped on overflow.
///
/// # Type Parameters
///
/// * `V` - The cached payload, opaque to the cache
/// * `C` - The clock used for TTL checks
pub struct RequestCache<V, C = SystemClock> {
    store: LruCache<CacheKey, CacheEntry<V>>,
    clock: C,
    counters: Counters,
    identity: Option<String>,
}

impl<V: Clone> RequestCache<V, SystemClock> {
    /// Creates an unbounded cache using the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<V: Clone> Default for RequestCache<V, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, C: Clock> RequestCache<V, C> {
    /// Creates an unbounded cache with the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self::with_capacity_and_clock(None, clock)
    }

    /// Creates a cache bounded to `max_entries` (if any) with the given clock.
    pub fn with_capacity_and_clock(max_entries: Option<usize>, clock: C) -> Self {
        let store = match max_entries.and_then(NonZeroUsize::new) {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self {
            store,
            clock,
            counters: Counters::default(),
            identity: None,
        }
    }

    /// Creates a cache sized according to `settings`.
    pub fn from_settings(settings: &CacheSettings, clock: C) -> Self {
        Self::with_capacity_and_clock(settings.max_entries, clock)
    }

    /// Returns the stored payload if present and not expired.
    ///
    /// An expired entry is removed. Every call counts as a hit or a miss.
    pub fn lookup(&mut self, key: &CacheKey) -> Option<V> {
        let now = self.clock.now_millis();

        let valid = match self.store.get(key) {
            Some(entry) => entry.is_valid(now),
            None => {
                self.counters.misses += 1;
                tracing::trace!(key = %key, "Cache miss");
                return None;
            }
        };

        if !valid {
            self.store.pop(key);
            self.counters.misses += 1;
            tracing::trace!(key = %key, "Cache entry expired");
            return None;
        }

        self.counters.hits += 1;
        tracing::trace!(key = %key, "Cache hit");
        self.store.peek(key).map(|entry| entry.payload.clone())
    }

    /// Inserts or overwrites an entry, stamped with the current time.
    pub fn store(&mut self, key: CacheKey, payload: V, ttl_ms: u64) {
        tracing::trace!(key = %key, ttl_ms, "Cache store");
        let entry = CacheEntry {
            payload,
            stored_at_ms: self.clock.now_millis(),
            ttl_ms,
        };
        self.store.put(key, entry);
    }

    /// Removes every entry whose path contains `/{entity_type}`.
    ///
    /// Returns the number of removed entries.
    pub fn invalidate_entity_type(&mut self, entity_type: &str) -> usize {
        let doomed: Vec<CacheKey> = self
            .store
            .iter()
            .filter(|(key, _)| key.matches_entity_type(entity_type))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.store.pop(key);
        }

        self.counters.invalidations += doomed.len() as u64;
        tracing::debug!(entity_type = %entity_type, count = doomed.len(), "Cache invalidated");
        doomed.len()
    }

    /// Records the current authentication token.
    ///
    /// Clears the whole cache when the token differs from the previously
    /// recorded one. Returns true if the cache was cleared.
    pub fn set_identity(&mut self, token: Option<&str>) -> bool {
        if self.identity.as_deref() == token {
            return false;
        }
        let cleared = self.clear_all();
        self.identity = token.map(str::to_string);
        tracing::debug!(cleared, authenticated = token.is_some(), "Cache identity changed");
        true
    }

    /// The token recorded by the last [`RequestCache::set_identity`] call.
    pub fn current_identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Empties the store. Returns the number of removed entries.
    pub fn clear_all(&mut self) -> usize {
        let size = self.store.len();
        self.store.clear();
        self.counters.invalidations += size as u64;
        size
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Rendered keys currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.store.iter().map(|(key, _)| key.to_string()).collect();
        keys.sort();
        keys
    }

    /// Snapshot of hit/miss/invalidation counters and the key set.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits,
            misses: self.counters.misses,
            invalidations: self.counters.invalidations,
            size: self.store.len(),
            entries: self.keys(),
        }
    }

    /// Resets the counters without touching stored entries.
    pub fn reset_stats(&mut self) {
        self.counters = Counters::default();
    }
}

mod clock;
mod config;
mod error;
mod keys;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheSettings, EntityCacheConfig, DEFAULT_CACHE_TTL_MS};
pub use error::{CacheError, Result};
pub use keys::{compute_key, entity_type_from_path, entity_type_from_url, CacheKey};
pub use store::{CacheStats, RequestCache};

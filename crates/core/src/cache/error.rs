use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Invalid TTL for '{entity_type}': must be greater than zero")]
    InvalidTtl { entity_type: String },
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

//! Cache service trait and error types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// What a redirect needs to know about a link.
///
/// The link id travels with the URL so a cache hit can still record a usage
/// event without touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedLink {
    pub link_id: i64,
    pub full_url: String,
}

/// Trait for caching short code lookups.
///
/// Implementations must be thread-safe and fail open: a broken cache degrades
/// to storage lookups, it never fails a request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Looks up a short code.
    ///
    /// Returns `Ok(None)` on a miss and on backend errors.
    async fn get_link(&self, code: &str) -> CacheResult<Option<CachedLink>>;

    /// Stores a short code mapping with optional TTL in seconds.
    ///
    /// Only writes when the code has no entry yet: an existing mapping or a
    /// tombstone left by [`Self::invalidate`] is kept. A fill that raced a
    /// delete therefore cannot bring the deleted link back.
    ///
    /// When `ttl_seconds` is `None` the implementation's default applies.
    async fn set_link(
        &self,
        code: &str,
        link: &CachedLink,
        ttl_seconds: Option<usize>,
    ) -> CacheResult<()>;

    /// Replaces a cached mapping with a tombstone. Called when a link is deleted.
    ///
    /// Lookups treat the tombstone as a miss; it blocks [`Self::set_link`]
    /// until it expires.
    async fn invalidate(&self, code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}

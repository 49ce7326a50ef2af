use std::time::Duration;

use async_trait::async_trait;

/// Cache store - abstraction over caching backends (Redis, in-memory).
///
/// `get` swallows backend failures into a miss; the write operations
/// surface them so callers can log. A cache failure never fails a
/// request - callers degrade to the repository.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value from the cache. Backend errors read as a miss.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a value with an optional TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Delete a single key. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Delete every key starting with `prefix` (coarse invalidation).
    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError>;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

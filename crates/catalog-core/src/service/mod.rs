//! Application services: cache-coherent catalog access and credential
//! flows.

pub mod keys;

mod auth;
mod categories;
mod products;
mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthService, AuthenticatedUser};
pub use categories::CategoryService;
pub use products::ProductService;
pub use users::UserService;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{DomainError, RepoError};
use crate::ports::Cache;

/// Read-through for collection reads: serve the cached value verbatim on
/// a hit, otherwise load from the repository and store the result. Cache
/// trouble degrades to the repository and is never surfaced.
pub(crate) async fn read_through<T, F>(
    cache: &dyn Cache,
    key: &str,
    ttl: Duration,
    load: F,
) -> Result<T, DomainError>
where
    T: Serialize + DeserializeOwned,
    F: Future<Output = Result<T, RepoError>>,
{
    if let Some(raw) = cache.get(key).await {
        match serde_json::from_str(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => tracing::warn!(key, error = %e, "dropping undecodable cache entry"),
        }
    }

    let value = load.await?;
    store(cache, key, ttl, &value).await;
    Ok(value)
}

/// Read-through for single-item reads. Absent ids are not cached; only
/// found entities are stored.
pub(crate) async fn read_through_item<T, F>(
    cache: &dyn Cache,
    key: &str,
    ttl: Duration,
    entity: &'static str,
    id: Uuid,
    load: F,
) -> Result<T, DomainError>
where
    T: Serialize + DeserializeOwned,
    F: Future<Output = Result<Option<T>, RepoError>>,
{
    if let Some(raw) = cache.get(key).await {
        match serde_json::from_str(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => tracing::warn!(key, error = %e, "dropping undecodable cache entry"),
        }
    }

    let value = load
        .await?
        .ok_or(DomainError::NotFound { entity, id })?;
    store(cache, key, ttl, &value).await;
    Ok(value)
}

async fn store<T: Serialize>(cache: &dyn Cache, key: &str, ttl: Duration, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = cache.set(key, &raw, Some(ttl)).await {
                tracing::warn!(key, error = %e, "cache write failed");
            }
        }
        Err(e) => tracing::warn!(key, error = %e, "cache serialization failed"),
    }
}

/// Evict one item key plus the given coarse prefixes. Evictions are
/// idempotent; failures are logged and swallowed.
pub(crate) async fn evict(cache: &dyn Cache, item_key: &str, prefixes: &[&str]) {
    if let Err(e) = cache.delete(item_key).await {
        tracing::warn!(key = item_key, error = %e, "cache eviction failed");
    }
    for prefix in prefixes {
        if let Err(e) = cache.delete_prefix(prefix).await {
            tracing::warn!(prefix, error = %e, "cache eviction failed");
        }
    }
}

//! Cache abstractions for enriched notes and note listings.
//!
//! Values are stored as JSON text so any serde type can share one store.
//! Expiry belongs to the backend; callers only see hits and misses.
//!
//! Concurrent misses on the same key are not coalesced: two tasks that miss
//! together will both compute and both write.

pub mod memory;

use std::future::Future;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

// Re-export for convenience
pub use memory::MemoryCache;

/// Trait for key/value cache backends shared across requests.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Read a live entry.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write an entry, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Read `key` from the cache, or compute, store and return it.
pub async fn try_get<T, F, Fut>(cache: &dyn Cache, key: &str, compute: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(raw) = cache.get(key).await? {
        match serde_json::from_str(&raw) {
            Ok(value) => {
                log::debug!("Cache hit: {}", key);
                return Ok(value);
            }
            Err(e) => log::warn!("Discarding unreadable cache entry {}: {}", key, e),
        }
    }

    let value = compute().await?;
    cache.set(key, serde_json::to_string(&value)?).await?;
    Ok(value)
}

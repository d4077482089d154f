//! Cache
//!
//! A keyed string store with per-entry expiry, plus the cache-aside accessor
//! used by read paths that tolerate bounded staleness.

use std::sync::Arc;

use tracing::warn;

mod aside;
mod errors;
mod memory;
mod redis_store;
mod store;

pub use aside::CacheAside;
pub use errors::CacheError;
pub use memory::MemoryCache;
pub use redis_store::{RedisCache, RedisSettings};
pub use store::*;

/// URL scheme selecting the in-process store.
pub const MEMORY_URL_SCHEME: &str = "memory://";

/// Build the store named by `settings.url`.
///
/// `memory://` keeps entries in this process only, which suits local
/// development; anything else is handed to Redis.
///
/// # Errors
///
/// Returns an error when the Redis URL is invalid.
pub fn connect(settings: &RedisSettings) -> Result<Arc<dyn CacheStore>, CacheError> {
    if settings.url.starts_with(MEMORY_URL_SCHEME) {
        warn!("using the in-process cache store, entries are not shared between processes");

        return Ok(Arc::new(MemoryCache::new()));
    }

    Ok(Arc::new(RedisCache::connect(settings)?))
}

//! Cache-aside reads.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    future::Future,
    sync::Arc,
    time::Duration,
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::cache::CacheStore;

/// Read-through accessor over an optional cache store.
///
/// The cache is never authoritative: every cache failure degrades to a
/// load from the source, and nothing is cached unless the load succeeds.
#[derive(Clone, Default)]
pub struct CacheAside {
    store: Option<Arc<dyn CacheStore>>,
}

impl Debug for CacheAside {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CacheAside")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl CacheAside {
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store: Some(store) }
    }

    /// An accessor that always misses.
    #[must_use]
    pub fn disabled() -> Self {
        Self { store: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Whether a configured store currently answers a ping.
    pub async fn is_available(&self) -> bool {
        match &self.store {
            Some(store) => store.ping().await.is_ok(),
            None => false,
        }
    }

    /// Return the cached value for `key`, or run `load` and cache its result for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns the loader's error. Cache errors are logged and swallowed.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, ttl: Duration, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(store) = &self.store else {
            return load().await;
        };

        match store.get(key).await {
            Ok(Some(payload)) => match serde_json::from_str::<T>(&payload) {
                Ok(value) => {
                    debug!(key, "cache hit");

                    return Ok(value);
                }
                Err(error) => warn!(key, %error, "discarding undecodable cache entry"),
            },
            Ok(None) => debug!(key, "cache miss"),
            Err(error) => warn!(key, %error, "cache read failed"),
        }

        let value = load().await?;

        match serde_json::to_string(&value) {
            Ok(payload) => {
                if let Err(error) = store.set_ex(key, &payload, ttl).await {
                    warn!(key, %error, "cache write failed");
                }
            }
            Err(error) => warn!(key, %error, "failed to encode cache entry"),
        }

        Ok(value)
    }
}

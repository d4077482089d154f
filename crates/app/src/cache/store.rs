//! Cache store abstraction.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;

use crate::cache::CacheError;

#[automock]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the value stored under `key`, if it exists and has not expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), CacheError>;
}

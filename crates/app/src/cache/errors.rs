//! Cache errors.

use deadpool_redis::{CreatePoolError, PoolError, redis::RedisError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to create cache pool")]
    CreatePool(#[from] CreatePoolError),

    #[error("failed to acquire cache connection")]
    Pool(#[from] PoolError),

    #[error("cache command failed")]
    Redis(#[from] RedisError),

    #[error("cache operation timed out")]
    Timeout,
}

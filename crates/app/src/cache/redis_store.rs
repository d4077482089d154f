//! Redis-backed cache store.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use deadpool_redis::{
    Config, Pool, PoolConfig, Runtime, Timeouts,
    redis::{AsyncCommands, cmd},
};
use tokio::time;
use tracing::debug;

use crate::cache::{CacheError, CacheStore};

/// Redis connection settings.
#[derive(Debug, Clone)]
pub struct RedisSettings {
    /// `redis://` connection URL.
    pub url: String,

    /// Connect over TLS. Certificates are not verified.
    pub tls: bool,

    /// Maximum number of pooled connections.
    pub pool_size: usize,

    /// Per-operation deadline; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl RedisSettings {
    /// The connection URL with the TLS scheme applied when requested.
    #[must_use]
    pub fn connection_url(&self) -> String {
        if !self.tls {
            return self.url.clone();
        }

        let url = match self.url.strip_prefix("redis://") {
            Some(rest) => format!("rediss://{rest}"),
            None => self.url.clone(),
        };

        if url.contains('#') {
            url
        } else {
            format!("{url}#insecure")
        }
    }
}

/// Cache store over a pool of Redis connections.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("status", &self.pool.status())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RedisCache {
    /// Build the connection pool. No connection is opened until first use.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is invalid.
    pub fn connect(settings: &RedisSettings) -> Result<Self, CacheError> {
        let mut config = Config::from_url(settings.connection_url());

        let mut pool_config = PoolConfig::new(settings.pool_size);

        pool_config.timeouts = Timeouts {
            wait: settings.timeout,
            create: settings.timeout,
            recycle: settings.timeout,
        };

        config.pool = Some(pool_config);

        let pool = config.create_pool(Some(Runtime::Tokio1))?;

        Ok(Self {
            pool,
            timeout: settings.timeout,
        })
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, CacheError>>,
    {
        match self.timeout {
            Some(timeout) => time::timeout(timeout, operation)
                .await
                .map_err(|_elapsed| CacheError::Timeout)?,
            None => operation.await,
        }
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let value: Option<String> = conn.get(key).await?;

            Ok(value)
        })
        .await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;

            conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                .await?;

            debug!(key, ttl_secs = ttl.as_secs(), "cache set");

            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;

            conn.del::<_, ()>(key).await?;

            Ok(())
        })
        .await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let _pong: String = cmd("PING").query_async(&mut conn).await?;

            Ok(())
        })
        .await
    }
}

//! Cache Config

use clap::Args;
use shopfront_app::{cache::RedisSettings, timeouts};

/// Redis settings.
#[derive(Debug, Args)]
pub struct CacheConfig {
    /// Redis connection URL; `memory://` keeps entries in this process
    #[arg(long, env = "REDIS_URL", hide_env_values = true)]
    pub redis_url: Option<String>,

    /// Connect to Redis over TLS
    #[arg(long, env = "REDIS_TLS", default_value_t = false)]
    pub redis_tls: bool,

    /// Maximum pooled Redis connections
    #[arg(long, env = "REDIS_POOL_SIZE", default_value_t = 16)]
    pub redis_pool_size: usize,

    /// Per-command deadline in milliseconds; 0 waits indefinitely
    #[arg(long, env = "REDIS_TIMEOUT_MS", default_value_t = 0)]
    pub redis_timeout_ms: u64,
}

/// Used by services that cannot run without a store.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

impl CacheConfig {
    /// Settings when a URL is configured.
    #[must_use]
    pub fn settings(&self) -> Option<RedisSettings> {
        self.redis_url.as_ref().map(|url| self.with_url(url))
    }

    /// Settings, falling back to the local default URL.
    #[must_use]
    pub fn settings_or_default(&self) -> RedisSettings {
        self.with_url(self.redis_url.as_deref().unwrap_or(DEFAULT_REDIS_URL))
    }

    fn with_url(&self, url: &str) -> RedisSettings {
        RedisSettings {
            url: url.to_string(),
            tls: self.redis_tls,
            pool_size: self.redis_pool_size,
            timeout: timeouts::from_millis(self.redis_timeout_ms),
        }
    }
}

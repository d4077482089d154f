//! Database Config

use clap::Args;
use shopfront_app::{database::DatabaseSettings, timeouts};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// `PostgreSQL` port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "postgres")]
    pub db_name: String,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,

    /// `require` connects over TLS
    #[arg(long, env = "PGSSLMODE")]
    pub pgsslmode: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 7)]
    pub db_max_connections: u32,

    /// Connections kept open when idle
    #[arg(long, env = "DB_MIN_CONNECTIONS", default_value_t = 2)]
    pub db_min_connections: u32,

    /// Seconds before an idle connection is closed; 0 keeps them open
    #[arg(long, env = "DB_IDLE_TIMEOUT_SECONDS", default_value_t = 60)]
    pub db_idle_timeout_seconds: u64,

    /// Seconds to wait for a pooled connection; 0 waits indefinitely
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 0)]
    pub db_acquire_timeout_seconds: u64,

    /// Per-statement limit in milliseconds; 0 disables it
    #[arg(long, env = "DB_STATEMENT_TIMEOUT_MS", default_value_t = 0)]
    pub db_statement_timeout_ms: u64,
}

impl DatabaseConfig {
    /// Connection settings for the app layer.
    #[must_use]
    pub fn settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            host: self.db_host.clone(),
            port: self.db_port,
            name: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            require_tls: self
                .pgsslmode
                .as_deref()
                .is_some_and(|mode| mode.eq_ignore_ascii_case("require")),
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections,
            idle_timeout: timeouts::from_secs(self.db_idle_timeout_seconds),
            acquire_timeout: timeouts::from_secs(self.db_acquire_timeout_seconds),
            statement_timeout: timeouts::from_millis(self.db_statement_timeout_ms),
        }
    }
}

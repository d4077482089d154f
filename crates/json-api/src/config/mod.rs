//! Server configuration module

use clap::{Args, Parser, Subcommand};

use crate::config::{
    auth::AuthConfig,
    cache::CacheConfig,
    db::DatabaseConfig,
    gateway::GatewayConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod cache;
pub(crate) mod db;
pub(crate) mod gateway;
pub(crate) mod observability;
pub(crate) mod server;

/// Shopfront JSON API configuration
#[derive(Debug, Parser)]
#[command(name = "shopfront-json", about = "Shopfront JSON API services", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// The service this process runs.
    #[command(subcommand)]
    pub service: ServiceCommand,
}

/// One process serves exactly one of these.
#[derive(Debug, Subcommand)]
pub enum ServiceCommand {
    /// Reverse proxy in front of the backend services.
    Gateway(GatewayConfig),

    /// Product catalog reader.
    Products(ProductsConfig),

    /// Per-user shopping carts.
    Cart(CartConfig),

    /// Order writer.
    Orders(OrdersConfig),
}

impl ServiceCommand {
    /// Name reported by health checks and telemetry.
    #[must_use]
    pub fn service_name(&self) -> &'static str {
        match self {
            Self::Gateway(_) => "api-gateway",
            Self::Products(_) => "product-service",
            Self::Cart(_) => "cart-service",
            Self::Orders(_) => "order-service",
        }
    }

    /// Port used when `SERVER_PORT` is unset.
    #[must_use]
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Gateway(_) => 8000,
            Self::Products(_) => 8002,
            Self::Cart(_) => 8003,
            Self::Orders(_) => 8004,
        }
    }
}

/// Product service settings.
#[derive(Debug, Args)]
pub struct ProductsConfig {
    /// Catalog database.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Optional read-through cache.
    #[command(flatten)]
    pub cache: CacheConfig,
}

/// Cart service settings.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Cart store.
    #[command(flatten)]
    pub cache: CacheConfig,

    /// Bearer token verification.
    #[command(flatten)]
    pub auth: AuthConfig,
}

/// Order service settings.
#[derive(Debug, Args)]
pub struct OrdersConfig {
    /// Orders database.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token verification.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Owner of orders placed without a bearer token
    #[arg(long, env = "GUEST_USER_ID", default_value = "1")]
    pub guest_user_id: String,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr(self.service.default_port())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_orders_service_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "shopfront-json",
            "orders",
            "--jwt-secret",
            "s3cret",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8004");
        assert_eq!(config.service.service_name(), "order-service");

        let ServiceCommand::Orders(orders) = config.service else {
            unreachable!("expected orders config");
        };

        assert_eq!(orders.guest_user_id, "1");
        assert_eq!(orders.database.settings().port, 5432);
        assert_eq!(orders.database.settings().acquire_timeout, None);

        Ok(())
    }

    #[test]
    fn explicit_port_wins_over_service_default() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "shopfront-json",
            "--port",
            "9100",
            "gateway",
            "--upstream-timeout-seconds",
            "5",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9100");

        let ServiceCommand::Gateway(gateway) = config.service else {
            unreachable!("expected gateway config");
        };

        assert_eq!(gateway.upstream_timeout(), Some(Duration::from_secs(5)));

        Ok(())
    }

    #[test]
    fn products_cache_is_optional() -> TestResult {
        let config = ServerConfig::try_parse_from(["shopfront-json", "products"])?;

        let ServiceCommand::Products(products) = config.service else {
            unreachable!("expected products config");
        };

        if std::env::var_os("REDIS_URL").is_none() {
            assert!(products.cache.settings().is_none(), "cache should be off");
        }

        Ok(())
    }
}

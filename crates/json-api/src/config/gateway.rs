//! Gateway Config

use std::time::Duration;

use clap::Args;
use shopfront_app::timeouts;
use url::Url;

/// Upstream service locations and proxy limits.
#[derive(Debug, Args)]
pub struct GatewayConfig {
    /// User service base URL
    #[arg(long, env = "USER_SERVICE_URL", default_value = "http://localhost:8001")]
    pub user_service_url: Url,

    /// Product service base URL
    #[arg(long, env = "PRODUCT_SERVICE_URL", default_value = "http://product-service:8002")]
    pub product_service_url: Url,

    /// Cart service base URL
    #[arg(long, env = "CART_SERVICE_URL", default_value = "http://cart-service:8003")]
    pub cart_service_url: Url,

    /// Order service base URL
    #[arg(long, env = "ORDER_SERVICE_URL", default_value = "http://order-service:8004")]
    pub order_service_url: Url,

    /// Payment service base URL
    #[arg(long, env = "PAYMENT_SERVICE_URL", default_value = "http://localhost:8005")]
    pub payment_service_url: Url,

    /// Inventory service base URL
    #[arg(long, env = "INVENTORY_SERVICE_URL", default_value = "http://localhost:8006")]
    pub inventory_service_url: Url,

    /// Seconds to wait for an upstream response; 0 waits indefinitely
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECONDS", default_value_t = 0)]
    pub upstream_timeout_seconds: u64,

    /// Largest request body forwarded upstream
    #[arg(long, env = "GATEWAY_MAX_BODY_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_body_bytes: usize,
}

impl GatewayConfig {
    /// Prefix to upstream pairs in declaration order.
    #[must_use]
    pub fn upstreams(&self) -> Vec<(&'static str, Url)> {
        vec![
            ("/api/users", self.user_service_url.clone()),
            ("/api/products", self.product_service_url.clone()),
            ("/api/cart", self.cart_service_url.clone()),
            ("/api/orders", self.order_service_url.clone()),
            ("/api/payments", self.payment_service_url.clone()),
            ("/api/inventory", self.inventory_service_url.clone()),
        ]
    }

    #[must_use]
    pub fn upstream_timeout(&self) -> Option<Duration> {
        timeouts::from_secs(self.upstream_timeout_seconds)
    }
}

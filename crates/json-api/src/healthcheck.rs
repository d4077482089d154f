//! Health Check Handlers
//!
//! One handler per service; each reports the dependencies it owns.

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use shopfront_app::context::{CartContext, ProductsContext};

use crate::{errors::ApiError, extensions::*};

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// `ok` or `error`
    pub status: String,

    /// Reporting service
    pub service: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis: Option<String>,

    /// Failure description when unhealthy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    fn ok(service: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            database: None,
            redis: None,
            error: None,
        }
    }

    fn failed(service: &str, error: impl ToString) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(error.to_string()),
            ..Self::ok(service)
        }
    }
}

fn connection_state(connected: bool) -> Option<String> {
    Some(if connected { "connected" } else { "disconnected" }.to_string())
}

/// Gateway health check
#[endpoint(tags("health"), summary = "Gateway health check")]
pub(crate) async fn gateway() -> Json<HealthResponse> {
    Json(HealthResponse::ok("api-gateway"))
}

/// Order service health check
#[endpoint(tags("health"), summary = "Order service health check")]
pub(crate) async fn orders() -> Json<HealthResponse> {
    Json(HealthResponse::ok("order-service"))
}

/// Product service health check
///
/// Pings the database; the cache is reported but never fails the check.
#[endpoint(tags("health"), summary = "Product service health check")]
pub(crate) async fn products(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<ProductsContext>>()?;

    if let Err(error) = ctx.products.ping_database().await {
        warn!("product database health check failed: {error}");

        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return Ok(Json(HealthResponse::failed("product-service", error)));
    }

    let redis = ctx.products.cache_connected().await;

    Ok(Json(HealthResponse {
        database: connection_state(true),
        redis: connection_state(redis),
        ..HealthResponse::ok("product-service")
    }))
}

/// Cart service health check
#[endpoint(tags("health"), summary = "Cart service health check")]
pub(crate) async fn cart(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<CartContext>>()?;

    if let Err(error) = ctx.carts.ping().await {
        warn!("cart store health check failed: {error}");

        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return Ok(Json(HealthResponse::failed("cart-service", error)));
    }

    Ok(Json(HealthResponse {
        redis: connection_state(true),
        ..HealthResponse::ok("cart-service")
    }))
}

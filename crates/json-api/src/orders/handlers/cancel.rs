//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use shopfront_app::context::OrdersContext;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{
        errors::into_api_error,
        handlers::{OrderUpdatedResponse, parse_order_id},
    },
};

/// Cancel Order Handler
///
/// Only pending or confirmed orders can be cancelled.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order cannot be cancelled"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderUpdatedResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<OrdersContext>>()?;
    let order_id = parse_order_id(&id.into_inner())?;

    let order = ctx
        .orders
        .cancel_order(order_id)
        .await
        .map_err(into_api_error)?;

    info!(order_id, "order cancelled via api");

    Ok(Json(OrderUpdatedResponse {
        message: "Order cancelled successfully".to_string(),
        order: order.into(),
    }))
}

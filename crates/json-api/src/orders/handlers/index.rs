//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use shopfront_app::context::OrdersContext;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, handlers::OrderResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Every order, newest first, each with its lines.
#[endpoint(tags("orders"), summary = "List Orders")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<OrdersContext>>()?;

    let orders = ctx.orders.list_orders().await.map_err(into_api_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

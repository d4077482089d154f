//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use shopfront_app::context::CartContext;

use crate::{
    carts::{errors::into_api_error, handlers::CartEnvelope},
    errors::ApiError,
    extensions::*,
};

/// Get Cart Handler
///
/// Shoppers who never added anything get an empty cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartEnvelope>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<CartContext>>()?;
    let user = depot.user_id_or_401()?;

    let cart = ctx
        .carts
        .get_cart(&user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartEnvelope { cart: cart.into() }))
}

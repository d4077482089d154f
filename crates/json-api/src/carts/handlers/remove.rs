//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use shopfront_app::context::CartContext;

use crate::{
    carts::{errors::into_api_error, handlers::CartUpdatedResponse},
    errors::ApiError,
    extensions::*,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found in cart"),
    ),
)]
pub(crate) async fn handler(
    asin: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<CartContext>>()?;
    let user = depot.user_id_or_401()?;

    let cart = ctx
        .carts
        .remove_item(&user, &asin.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartUpdatedResponse::new("Item removed from cart", cart)))
}

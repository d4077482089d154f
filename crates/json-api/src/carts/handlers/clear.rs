//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use shopfront_app::context::CartContext;

use crate::{
    carts::{errors::into_api_error, handlers::CartUpdatedResponse},
    errors::ApiError,
    extensions::*,
};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartUpdatedResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<CartContext>>()?;
    let user = depot.user_id_or_401()?;

    let cart = ctx
        .carts
        .clear_cart(&user)
        .await
        .map_err(into_api_error)?;

    info!(user = %user, "cart cleared");

    Ok(Json(CartUpdatedResponse::new("Cart cleared", cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::carts::{MockCartsService, models::Cart};

    use crate::test_helpers::{cart_service, test_user};

    use super::*;

    #[tokio::test]
    async fn test_clear_returns_empty_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(|user| *user == test_user())
            .return_once(|_| Ok(Cart::empty()));

        let mut res = TestClient::delete("http://example.com/clear")
            .send(&cart_service(carts, Router::with_path("clear").delete(handler)))
            .await;

        let body: CartUpdatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Cart cleared");
        assert_eq!(body.cart.total_items, 0);

        Ok(())
    }
}

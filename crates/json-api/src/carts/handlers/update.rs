//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::{
    context::CartContext,
    domain::carts::{CartsServiceError, data::CartItemUpdate},
};

use crate::{
    carts::{errors::into_api_error, handlers::CartUpdatedResponse},
    errors::ApiError,
    extensions::*,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    #[serde(default, alias = "product_id")]
    pub asin: Option<String>,

    /// New quantity; zero or less removes the line
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl TryFrom<UpdateItemRequest> for CartItemUpdate {
    type Error = CartsServiceError;

    fn try_from(request: UpdateItemRequest) -> Result<Self, Self::Error> {
        let (Some(asin), Some(quantity)) = (request.asin, request.quantity) else {
            return Err(CartsServiceError::MissingFields("asin, quantity"));
        };

        Ok(CartItemUpdate { asin, quantity })
    }
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found in cart"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<CartContext>>()?;
    let user = depot.user_id_or_401()?;

    let update = CartItemUpdate::try_from(json.into_inner()).map_err(into_api_error)?;

    let cart = ctx
        .carts
        .update_item(&user, update)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartUpdatedResponse::new("Cart updated", cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::carts::MockCartsService;

    use crate::{carts::handlers::tests::make_cart, errors::ErrorBody, test_helpers::cart_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        cart_service(carts, Router::with_path("update").put(handler))
    }

    #[tokio::test]
    async fn test_update_overwrites_quantity() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(|_, update| {
                *update
                    == CartItemUpdate {
                        asin: "A1".to_string(),
                        quantity: 5,
                    }
            })
            .return_once(|_, _| Ok(make_cart(&[("A1", 100, 5)])));

        let mut res = TestClient::put("http://example.com/update")
            .json(&json!({ "asin": "A1", "quantity": 5 }))
            .send(&make_service(carts))
            .await;

        let body: CartUpdatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Cart updated");
        assert_eq!(body.cart.total_items, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_without_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_update_item().never();

        let mut res = TestClient::put("http://example.com/update")
            .json(&json!({ "asin": "A1" }))
            .send(&make_service(carts))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Missing required fields: asin, quantity");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_absent_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ItemNotFound));

        let mut res = TestClient::put("http://example.com/update")
            .json(&json!({ "product_id": "ZZ", "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Item not found in cart");

        Ok(())
    }
}

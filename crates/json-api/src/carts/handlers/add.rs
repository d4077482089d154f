//! Add Cart Item Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use shopfront_app::{context::CartContext, domain::carts::data::NewCartItem};

use crate::{
    carts::{errors::into_api_error, handlers::CartUpdatedResponse},
    errors::ApiError,
    extensions::*,
};

fn default_quantity() -> i64 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    /// Product asin; `product_id` is accepted as an alias
    #[serde(default, alias = "product_id")]
    pub asin: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// Unit price as a number or decimal string
    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub price: Option<Decimal>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl From<AddItemRequest> for NewCartItem {
    fn from(request: AddItemRequest) -> Self {
        NewCartItem {
            asin: request.asin.unwrap_or_default(),
            title: request.title.unwrap_or_default(),
            price: request.price.unwrap_or(Decimal::ZERO),
            image: request.image,
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
///
/// Adding an asin already in the cart increments its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart store unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<CartContext>>()?;
    let user = depot.user_id_or_401()?;

    let item: NewCartItem = json.into_inner().into();
    let asin = item.asin.clone();

    let cart = ctx
        .carts
        .add_item(&user, item)
        .await
        .map_err(into_api_error)?;

    info!(user = %user, asin = %asin, total_items = cart.total_items, "item added to cart");

    Ok(Json(CartUpdatedResponse::new("Item added to cart", cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::{
        carts::handlers::tests::make_cart,
        errors::ErrorBody,
        test_helpers::{cart_service, test_user},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        cart_service(carts, Router::with_path("add").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_success() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|user, item| {
                *user == test_user()
                    && *item
                        == NewCartItem {
                            asin: "A1".to_string(),
                            title: "Desk Lamp".to_string(),
                            price: Decimal::new(1999, 2),
                            image: None,
                            quantity: 2,
                        }
            })
            .return_once(|_, _| Ok(make_cart(&[("A1", 1999, 2)])));

        let mut res = TestClient::post("http://example.com/add")
            .json(&json!({ "asin": "A1", "title": "Desk Lamp", "price": "19.99", "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: CartUpdatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Item added to cart");
        assert_eq!(body.cart.total_items, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_accepts_product_id_and_defaults_quantity() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, item| item.asin == "B2" && item.quantity == 1)
            .return_once(|_, _| Ok(make_cart(&[("B2", 500, 1)])));

        let res = TestClient::post("http://example.com/add")
            .json(&json!({ "product_id": "B2", "title": "Mug", "price": 5 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_missing_fields_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, item| item.title.is_empty() && item.price.is_zero())
            .return_once(|_, _| Err(CartsServiceError::MissingFields("asin, title, price")));

        let mut res = TestClient::post("http://example.com/add")
            .json(&json!({ "asin": "A1" }))
            .send(&make_service(carts))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Missing required fields: asin, title, price");

        Ok(())
    }
}

//! Create Order Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::{
    auth::UserId,
    context::OrdersContext,
    domain::orders::data::{NewOrder, NewOrderItem, ShippingDetails},
};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, handlers::OrderUpdatedResponse},
};

/// Order line as submitted
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
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
    pub quantity: Option<i64>,

    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
}

impl From<OrderItemRequest> for NewOrderItem {
    fn from(item: OrderItemRequest) -> Self {
        NewOrderItem {
            asin: item.asin.unwrap_or_default(),
            title: item.title,
            price: item.price.unwrap_or(Decimal::ZERO),
            quantity: item.quantity.unwrap_or(0),
            image_url: item.image_url,
        }
    }
}

/// Shipping and payment details; absent fields get guest defaults
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    #[serde(alias = "postal_code")]
    pub zip_code: Option<String>,

    pub country: Option<String>,
    pub phone: Option<String>,

    #[serde(alias = "payment_method")]
    pub payment_method: Option<String>,
}

impl From<ShippingRequest> for ShippingDetails {
    fn from(shipping: ShippingRequest) -> Self {
        ShippingDetails {
            name: shipping.name,
            email: shipping.email,
            address: shipping.address,
            city: shipping.city,
            state: shipping.state,
            postal_code: shipping.zip_code,
            country: shipping.country,
            phone: shipping.phone,
            payment_method: shipping.payment_method,
        }
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,

    /// Client-computed total; the server recomputes it from the items
    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub total_amount: Option<Decimal>,

    #[serde(default)]
    pub shipping: Option<ShippingRequest>,
}

impl CreateOrderRequest {
    fn into_new_order(self, user: UserId) -> NewOrder {
        NewOrder {
            user,
            items: self.items.into_iter().map(Into::into).collect(),
            client_total: self.total_amount,
            shipping: self.shipping.unwrap_or_default().into(),
        }
    }
}

/// Create Order Handler
///
/// Orders placed without a credential belong to the guest user.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Invalid or expired token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderUpdatedResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<OrdersContext>>()?;
    let user = depot.user_id().unwrap_or_else(|| ctx.guest_user.clone());

    let order = ctx
        .orders
        .create_order(json.into_inner().into_new_order(user))
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(OrderUpdatedResponse {
        message: "Order created successfully".to_string(),
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, models::OrderStatus,
    };

    use crate::{
        errors::ErrorBody,
        orders::handlers::tests::make_order,
        test_helpers::{GUEST_USER_ID, TEST_USER_ID, anonymous_orders_service, orders_service},
    };

    use super::*;

    fn body() -> serde_json::Value {
        json!({
            "items": [
                { "product_id": "A1", "title": "Desk Lamp", "price": 19.99, "quantity": 2 }
            ],
            "total_amount": 1,
            "shipping": { "name": "Ada", "zipCode": "EC1A" }
        })
    }

    #[tokio::test]
    async fn test_create_order_for_authenticated_user() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|order| {
                order.user.as_str() == TEST_USER_ID
                    && order.items.len() == 1
                    && order.items.first().map(|i| i.asin.as_str()) == Some("A1")
                    && order.client_total == Some(Decimal::ONE)
                    && order.shipping.name.as_deref() == Some("Ada")
                    && order.shipping.postal_code.as_deref() == Some("EC1A")
            })
            .return_once(|_| Ok(make_order(9, OrderStatus::Pending)));

        let mut res = TestClient::post("http://example.com/")
            .json(&body())
            .send(&orders_service(orders, Router::new().post(handler)))
            .await;

        let body: OrderUpdatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.message, "Order created successfully");
        assert_eq!(body.order.order_id, 9);
        assert_eq!(body.order.status, "pending");
        assert_eq!(body.order.total_amount, "39.98");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_without_credential_uses_guest() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|order| order.user.as_str() == GUEST_USER_ID)
            .return_once(|_| Ok(make_order(1, OrderStatus::Pending)));

        let res = TestClient::post("http://example.com/")
            .json(&body())
            .send(&anonymous_orders_service(orders, Router::new().post(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_empty_order_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|order| order.items.is_empty())
            .return_once(|_| Err(OrdersServiceError::EmptyOrder));

        let mut res = TestClient::post("http://example.com/")
            .json(&json!({ "items": [] }))
            .send(&orders_service(orders, Router::new().post(handler)))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Order must contain at least one item");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_storage_failure_returns_500() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::post("http://example.com/")
            .json(&body())
            .send(&orders_service(orders, Router::new().post(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}

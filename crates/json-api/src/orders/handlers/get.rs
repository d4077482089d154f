//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use shopfront_app::context::OrdersContext;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{
        errors::into_api_error,
        handlers::{OrderEnvelope, parse_order_id},
    },
};

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<OrdersContext>>()?;
    let order_id = parse_order_id(&id.into_inner())?;

    let order = ctx
        .orders
        .get_order(order_id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(OrderEnvelope {
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, models::OrderStatus,
    };

    use crate::{
        errors::ErrorBody, orders::handlers::tests::make_order, test_helpers::orders_service,
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_order() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|id| *id == 7)
            .return_once(|id| Ok(make_order(id, OrderStatus::Pending)));

        let mut res = TestClient::get("http://example.com/7")
            .send(&make_service(orders))
            .await;

        let body: OrderEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.order.order_id, 7);
        assert_eq!(body.order.shipping_name, "Guest User");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let mut res = TestClient::get("http://example.com/404")
            .send(&make_service(orders))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Order not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();

        let res = TestClient::get("http://example.com/abc")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

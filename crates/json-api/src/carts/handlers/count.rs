//! Cart Count Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use shopfront_app::context::CartContext;

use crate::{errors::ApiError, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CountResponse {
    /// Total units in the cart
    pub count: u64,
}

/// Cart Count Handler
///
/// Reports zero when the cart cannot be read.
#[endpoint(
    tags("cart"),
    summary = "Count Cart Items",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CountResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<CartContext>>()?;
    let user = depot.user_id_or_401()?;

    let count = ctx.carts.item_count(&user).await;

    Ok(Json(CountResponse { count }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::carts::MockCartsService;

    use crate::test_helpers::cart_service;

    use super::*;

    #[tokio::test]
    async fn test_count_reports_units() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_item_count().once().return_once(|_| 4);

        let body: CountResponse = TestClient::get("http://example.com/count")
            .send(&cart_service(carts, Router::with_path("count").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(body.count, 4);

        Ok(())
    }
}

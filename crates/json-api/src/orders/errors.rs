//! Order Errors

use tracing::error;

use shopfront_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::EmptyOrder => {
            ApiError::bad_request("Order must contain at least one item")
        }
        OrdersServiceError::InvalidItem(reason) => {
            ApiError::bad_request(format!("Invalid order item: {reason}"))
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => ApiError::bad_request("Invalid order payload"),
        OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
        OrdersServiceError::NotCancellable => ApiError::conflict("Order cannot be cancelled"),
        OrdersServiceError::AlreadyExists => {
            error!("order number collision");

            ApiError::conflict("Order already exists")
        }
        OrdersServiceError::Sql(source) => {
            error!("order query failed: {source}");

            ApiError::internal().with_detail(source)
        }
    }
}

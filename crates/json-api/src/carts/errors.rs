//! Cart Errors

use tracing::error;

use shopfront_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::MissingFields(fields) => {
            ApiError::bad_request(format!("Missing required fields: {fields}"))
        }
        CartsServiceError::InvalidPrice => {
            ApiError::bad_request("Price must be greater than zero")
        }
        CartsServiceError::InvalidQuantity => ApiError::bad_request("Quantity must be at least 1"),
        CartsServiceError::TotalOverflow => ApiError::bad_request("Cart total is too large"),
        CartsServiceError::ItemNotFound => ApiError::not_found("Item not found in cart"),
        CartsServiceError::Store(source) => {
            error!("cart store failed: {source}");

            ApiError::unavailable("Cart store unavailable").with_detail(source)
        }
        CartsServiceError::Encode(source) => {
            error!("failed to encode cart: {source}");

            ApiError::internal().with_detail(source)
        }
    }
}

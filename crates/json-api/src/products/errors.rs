//! Product Errors

use tracing::error;

use shopfront_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
        ProductsServiceError::InvalidPagination(_) => ApiError::bad_request(error.to_string()),
        ProductsServiceError::MissingQuery => ApiError::bad_request("Search query required"),
        ProductsServiceError::Sql(source) => {
            error!("product query failed: {source}");

            ApiError::internal().with_detail(source)
        }
    }
}

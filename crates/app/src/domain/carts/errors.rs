//! Carts service errors.

use thiserror::Error;

use crate::cache::CacheError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// One or more mandatory fields are absent or blank.
    #[error("missing required fields: {0}")]
    MissingFields(&'static str),

    #[error("price must be greater than zero")]
    InvalidPrice,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// A line subtotal or the cart total does not fit in a decimal.
    #[error("cart total is too large")]
    TotalOverflow,

    #[error("item not found in cart")]
    ItemNotFound,

    #[error("cart store unavailable")]
    Store(#[from] CacheError),

    #[error("failed to encode cart")]
    Encode(#[source] serde_json::Error),
}

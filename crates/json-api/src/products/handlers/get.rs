//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::{context::ProductsContext, domain::products::models::Product};

use crate::{errors::ApiError, extensions::*, products::errors::into_api_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Amazon standard identification number
    pub asin: String,

    pub title: String,
    pub description: Option<String>,

    /// Decimal price, e.g. `"19.99"`
    pub price: String,

    pub category: String,
    pub image: Option<String>,
    pub is_available: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            asin: product.asin,
            title: product.title,
            description: product.description,
            price: product.price.to_string(),
            category: product.category,
            image: product.image,
            is_available: product.is_available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEnvelope {
    pub product: ProductResponse,
}

/// Get Product Handler
///
/// Returns a single product, served from cache when possible.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    asin: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<ProductsContext>>()?;

    let product = ctx
        .products
        .get_product(&asin.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(Json(ProductEnvelope {
        product: product.into(),
    }))
}

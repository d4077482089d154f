//! Product Search Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::{
    context::ProductsContext,
    domain::products::{
        ProductsServiceError,
        data::{Page, ProductSearchQuery},
    },
};

use crate::{
    errors::ApiError, extensions::*, products::errors::into_api_error,
    products::index::ProductSummaryResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchResponse {
    pub products: Vec<ProductSummaryResponse>,

    /// Number of products on this page
    pub total: usize,

    pub query: String,
}

/// Product Search Handler
///
/// Case-insensitive match on title or description.
#[endpoint(tags("products"), summary = "Search Products")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    page: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SearchResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<ProductsContext>>()?;

    let term = q
        .into_inner()
        .filter(|term| !term.trim().is_empty())
        .ok_or(ProductsServiceError::MissingQuery)
        .map_err(into_api_error)?;

    let page = Page::parse(page.into_inner().as_deref(), limit.into_inner().as_deref())
        .map_err(into_api_error)?;

    let results = ctx
        .products
        .search_products(ProductSearchQuery { term, page })
        .await
        .map_err(into_api_error)?;

    Ok(Json(SearchResponse {
        products: results.products.into_iter().map(Into::into).collect(),
        total: results.total,
        query: results.query,
    }))
}

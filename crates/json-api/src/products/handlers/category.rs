//! Category Products Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::{
    context::ProductsContext,
    domain::products::data::{CategoryQuery, Page, ProductSort},
};

use crate::{
    errors::ApiError,
    extensions::*,
    products::errors::into_api_error,
    products::index::{PaginationResponse, ProductSummaryResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryProductsResponse {
    pub products: Vec<ProductSummaryResponse>,
    pub pagination: PaginationResponse,
    pub category: String,
}

/// Category Products Handler
///
/// `sort` is one of `title`, `price_asc`, `price_desc` or `newest`; anything
/// else sorts by title.
#[endpoint(tags("products"), summary = "List Category Products")]
pub(crate) async fn handler(
    category: PathParam<String>,
    page: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CategoryProductsResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<ProductsContext>>()?;

    let page = Page::parse(page.into_inner().as_deref(), limit.into_inner().as_deref())
        .map_err(into_api_error)?;

    let query = CategoryQuery {
        category: category.into_inner(),
        page,
        sort: ProductSort::parse_or_default(sort.into_inner().as_deref()),
    };

    let listing = ctx
        .products
        .list_category_products(query)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CategoryProductsResponse {
        products: listing.products.into_iter().map(Into::into).collect(),
        pagination: listing.pagination.into(),
        category: listing.category,
    }))
}

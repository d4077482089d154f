//! Categories Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use shopfront_app::{context::ProductsContext, domain::products::models::Category};

use crate::{errors::ApiError, extensions::*, products::errors::into_api_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub product_count: i64,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            product_count: category.product_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

/// Categories Handler
///
/// Every category with listed products, largest first.
#[endpoint(tags("products"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<ProductsContext>>()?;

    let list = ctx
        .products
        .list_categories()
        .await
        .map_err(into_api_error)?;

    Ok(Json(CategoriesResponse {
        categories: list.categories.into_iter().map(Into::into).collect(),
    }))
}

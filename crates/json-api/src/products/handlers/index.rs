//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::{
    context::ProductsContext,
    domain::products::{
        data::{Page, ProductListQuery},
        models::{Pagination, ProductSummary},
    },
};

use crate::{errors::ApiError, extensions::*, products::errors::into_api_error};

/// Product listing entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummaryResponse {
    pub asin: String,
    pub title: String,

    /// Decimal price, e.g. `"19.99"`
    pub price: String,

    pub category: String,
    pub image: Option<String>,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(product: ProductSummary) -> Self {
        Self {
            asin: product.asin,
            title: product.title,
            price: product.price.to_string(),
            category: product.category,
            image: product.image,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total: pagination.total,
            total_pages: pagination.total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    pub products: Vec<ProductSummaryResponse>,
    pub pagination: PaginationResponse,
}

/// Product Index Handler
///
/// Pages through listable products, by title or newest first when `featured=true`.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    page: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    category: QueryParam<String, false>,
    featured: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, ApiError> {
    let ctx = depot.obtain_or_500::<Arc<ProductsContext>>()?;

    let page = Page::parse(page.into_inner().as_deref(), limit.into_inner().as_deref())
        .map_err(into_api_error)?;

    let query = ProductListQuery {
        page,
        category: category.into_inner().filter(|category| !category.is_empty()),
        featured: featured.into_inner().as_deref() == Some("true"),
    };

    let listing = ctx
        .products
        .list_products(query)
        .await
        .map_err(into_api_error)?;

    Ok(Json(ProductsResponse {
        products: listing.products.into_iter().map(Into::into).collect(),
        pagination: listing.pagination.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::products::{
        MockProductsService, ProductsServiceError, data::MAX_LIMIT, models::ProductPage,
    };

    use crate::{
        products::handlers::tests::{make_pagination, make_summary},
        test_helpers::products_service,
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::new().get(handler))
    }

    #[tokio::test]
    async fn test_index_uses_default_page() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| *query == ProductListQuery::default())
            .return_once(|_| {
                Ok(ProductPage {
                    products: vec![make_summary("A1", 1999)],
                    pagination: make_pagination(1, 20, 1),
                })
            });

        let mut res = TestClient::get("http://example.com/")
            .send(&make_service(products))
            .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.products.len(), 1);
        assert_eq!(body.products.first().map(|p| p.price.as_str()), Some("19.99"));
        assert_eq!(body.pagination.total_pages, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| {
                query.page == Page { page: 3, limit: MAX_LIMIT }
                    && query.category.as_deref() == Some("LAMP")
                    && query.featured
            })
            .return_once(|_| {
                Ok(ProductPage {
                    products: Vec::new(),
                    pagination: make_pagination(3, MAX_LIMIT, 0),
                })
            });

        let res = TestClient::get(
            "http://example.com/?page=3&limit=500&category=LAMP&featured=true",
        )
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_bad_pagination() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/?page=0")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}

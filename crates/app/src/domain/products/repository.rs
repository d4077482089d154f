//! Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::products::{
    data::{CategoryQuery, ProductListQuery, ProductSearchQuery},
    models::{Category, Product, ProductSummary},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const LIST_CATEGORY_PRODUCTS_SQL: &str = include_str!("sql/list_category_products.sql");
const COUNT_CATEGORY_PRODUCTS_SQL: &str = include_str!("sql/count_category_products.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        query: &ProductListQuery,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        query_as::<Postgres, ProductSummary>(LIST_PRODUCTS_SQL)
            .bind(query.category.as_deref())
            .bind(query.featured)
            .bind(i64::from(query.page.limit))
            .bind(query.page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(category)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asin: &str,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(asin)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        query: &ProductSearchQuery,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        query_as::<Postgres, ProductSummary>(SEARCH_PRODUCTS_SQL)
            .bind(query.pattern())
            .bind(i64::from(query.page.limit))
            .bind(query.page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_category_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        query: &CategoryQuery,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        query_as::<Postgres, ProductSummary>(LIST_CATEGORY_PRODUCTS_SQL)
            .bind(&query.category)
            .bind(query.sort.as_str())
            .bind(i64::from(query.page.limit))
            .bind(query.page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_category_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &str,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CATEGORY_PRODUCTS_SQL)
            .bind(category)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            asin: row.try_get("asin")?,
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
            image: row.try_get("image")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            asin: row.try_get("asin")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
            image: row.try_get("image")?,
            is_available: row.try_get("is_available")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            product_count: row.try_get("product_count")?,
        })
    }
}

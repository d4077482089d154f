//! Products service.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    cache::CacheAside,
    database::Db,
    domain::products::{
        data::{CategoryQuery, ProductListQuery, ProductSearchQuery},
        errors::ProductsServiceError,
        models::{CategoryList, CategoryPage, Pagination, Product, ProductPage, SearchResults},
        repository::PgProductsRepository,
    },
};

/// Cache lifetime of a single product.
pub const PRODUCT_TTL: Duration = Duration::from_secs(60 * 60);

/// Cache lifetime of a category listing page.
pub const CATEGORY_PAGE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache lifetime of the category list.
pub const CATEGORY_LIST_TTL: Duration = Duration::from_secs(60 * 60);

/// Cache key of the category list.
pub const CATEGORY_LIST_KEY: &str = "categories:list";

/// Cache key of a single product.
#[must_use]
pub fn product_key(asin: &str) -> String {
    format!("product:{asin}")
}

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    cache: CacheAside,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, cache: CacheAside) -> Self {
        Self {
            db,
            cache,
            repository: PgProductsRepository::new(),
        }
    }

    async fn load_product(&self, asin: &str) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, asin).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn load_category_page(
        &self,
        query: &CategoryQuery,
    ) -> Result<CategoryPage, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self
            .repository
            .count_category_products(&mut tx, &query.category)
            .await?;

        let products = self
            .repository
            .list_category_products(&mut tx, query)
            .await?;

        tx.commit().await?;

        Ok(CategoryPage {
            products,
            pagination: Pagination {
                page: query.page.page,
                limit: query.page.limit,
                total,
                total_pages: query.page.total_pages(total),
            },
            category: query.category.clone(),
        })
    }

    async fn load_categories(&self) -> Result<CategoryList, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(CategoryList { categories })
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> Result<ProductPage, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self
            .repository
            .count_products(&mut tx, query.category.as_deref())
            .await?;

        let products = self.repository.list_products(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(ProductPage {
            products,
            pagination: Pagination {
                page: query.page.page,
                limit: query.page.limit,
                total,
                total_pages: query.page.total_pages(total),
            },
        })
    }

    async fn get_product(&self, asin: &str) -> Result<Product, ProductsServiceError> {
        self.cache
            .get_or_load(&product_key(asin), PRODUCT_TTL, || self.load_product(asin))
            .await
    }

    async fn search_products(
        &self,
        query: ProductSearchQuery,
    ) -> Result<SearchResults, ProductsServiceError> {
        if query.term.trim().is_empty() {
            return Err(ProductsServiceError::MissingQuery);
        }

        let mut tx = self.db.begin().await?;

        let products = self.repository.search_products(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(SearchResults {
            total: products.len(),
            products,
            query: query.term,
        })
    }

    async fn list_category_products(
        &self,
        query: CategoryQuery,
    ) -> Result<CategoryPage, ProductsServiceError> {
        self.cache
            .get_or_load(&query.cache_key(), CATEGORY_PAGE_TTL, || {
                self.load_category_page(&query)
            })
            .await
    }

    async fn list_categories(&self) -> Result<CategoryList, ProductsServiceError> {
        self.cache
            .get_or_load(CATEGORY_LIST_KEY, CATEGORY_LIST_TTL, || self.load_categories())
            .await
    }

    async fn ping_database(&self) -> Result<(), ProductsServiceError> {
        Ok(self.db.ping().await?)
    }

    async fn cache_connected(&self) -> bool {
        self.cache.is_available().await
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Page through listable products.
    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single product by asin.
    async fn get_product(&self, asin: &str) -> Result<Product, ProductsServiceError>;

    /// Case-insensitive search over titles and descriptions.
    async fn search_products(
        &self,
        query: ProductSearchQuery,
    ) -> Result<SearchResults, ProductsServiceError>;

    /// Page through one category.
    async fn list_category_products(
        &self,
        query: CategoryQuery,
    ) -> Result<CategoryPage, ProductsServiceError>;

    /// All categories with their product counts.
    async fn list_categories(&self) -> Result<CategoryList, ProductsServiceError>;

    /// Round-trip the database.
    async fn ping_database(&self) -> Result<(), ProductsServiceError>;

    /// Whether the cache answers.
    async fn cache_connected(&self) -> bool;
}

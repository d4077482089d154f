//! App Context
//!
//! Each server process runs one service; these builders wire that service's
//! handles from settings.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::{AuthService, JwtAuthService, UserId},
    cache::{self, CacheAside, CacheError, RedisSettings},
    database::{self, DatabaseSettings, Db},
    domain::{
        carts::{CartsService, KvCartsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to set up cache")]
    Cache(#[source] CacheError),
}

async fn connect_db(settings: &DatabaseSettings) -> Result<Db, AppInitError> {
    let pool = database::connect(settings)
        .await
        .map_err(AppInitError::Database)?;

    info!(host = %settings.host, database = %settings.name, "connected to database");

    Ok(Db::new(pool))
}

/// Handles for the product catalog service.
#[derive(Clone)]
pub struct ProductsContext {
    pub products: Arc<dyn ProductsService>,
}

impl Debug for ProductsContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProductsContext").finish_non_exhaustive()
    }
}

impl ProductsContext {
    /// Connect the catalog; a missing cache URL runs it uncached.
    ///
    /// # Errors
    ///
    /// Returns an error when the database or cache pool cannot be set up.
    pub async fn connect(
        db: &DatabaseSettings,
        cache: Option<&RedisSettings>,
    ) -> Result<Self, AppInitError> {
        let db = connect_db(db).await?;

        let cache = match cache {
            Some(settings) => {
                let store = cache::connect(settings).map_err(AppInitError::Cache)?;

                CacheAside::new(store)
            }
            None => {
                warn!("no cache configured, product reads go straight to the database");

                CacheAside::disabled()
            }
        };

        Ok(Self {
            products: Arc::new(PgProductsService::new(db, cache)),
        })
    }
}

/// Handles for the cart service.
#[derive(Clone)]
pub struct CartContext {
    pub carts: Arc<dyn CartsService>,
    pub auth: Arc<dyn AuthService>,
}

impl Debug for CartContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartContext").finish_non_exhaustive()
    }
}

impl CartContext {
    /// # Errors
    ///
    /// Returns an error when the cache pool cannot be built.
    pub fn connect(store: &RedisSettings, jwt_secret: &str) -> Result<Self, AppInitError> {
        let store = cache::connect(store).map_err(AppInitError::Cache)?;

        Ok(Self {
            carts: Arc::new(KvCartsService::new(store)),
            auth: Arc::new(JwtAuthService::new(jwt_secret)),
        })
    }
}

/// Handles for the order service.
#[derive(Clone)]
pub struct OrdersContext {
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,

    /// Owner of orders placed without a credential.
    pub guest_user: UserId,
}

impl Debug for OrdersContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OrdersContext")
            .field("guest_user", &self.guest_user)
            .finish_non_exhaustive()
    }
}

impl OrdersContext {
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn connect(
        db: &DatabaseSettings,
        jwt_secret: &str,
        guest_user: UserId,
    ) -> Result<Self, AppInitError> {
        let db = connect_db(db).await?;

        Ok(Self {
            orders: Arc::new(PgOrdersService::new(db)),
            auth: Arc::new(JwtAuthService::new(jwt_secret)),
            guest_user,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        auth::MockAuthService,
        domain::{carts::MockCartsService, orders::MockOrdersService, products::MockProductsService},
    };

    use super::*;

    #[test]
    fn debug_output_names_the_context_without_handles() {
        let products = ProductsContext {
            products: Arc::new(MockProductsService::new()),
        };
        let carts = CartContext {
            carts: Arc::new(MockCartsService::new()),
            auth: Arc::new(MockAuthService::new()),
        };
        let orders = OrdersContext {
            orders: Arc::new(MockOrdersService::new()),
            auth: Arc::new(MockAuthService::new()),
            guest_user: UserId::new("1"),
        };

        assert_eq!(format!("{products:?}"), "ProductsContext { .. }");
        assert_eq!(format!("{carts:?}"), "CartContext { .. }");
        assert!(
            format!("{orders:?}").starts_with("OrdersContext { guest_user: UserId(\"1\")"),
            "got {orders:?}"
        );
    }
}

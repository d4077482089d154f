//! Carts service.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    auth::UserId,
    cache::{CacheError, CacheStore},
    domain::carts::{
        CartLocks,
        data::{CartItemUpdate, NewCartItem},
        errors::CartsServiceError,
        models::Cart,
    },
};

/// How long a cart survives after its last write.
pub const CART_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Storage key for a shopper's cart.
#[must_use]
pub fn cart_key(user: &UserId) -> String {
    format!("cart:{user}")
}

/// Carts kept as JSON documents in a key-value store.
#[derive(Clone)]
pub struct KvCartsService {
    store: Arc<dyn CacheStore>,
    locks: CartLocks,
    ttl: Duration,
}

impl std::fmt::Debug for KvCartsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvCartsService")
            .field("locks", &self.locks)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl KvCartsService {
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            locks: CartLocks::new(),
            ttl: CART_TTL,
        }
    }

    async fn load(&self, user: &UserId) -> Result<Cart, CacheError> {
        let Some(payload) = self.store.get(&cart_key(user)).await? else {
            return Ok(Cart::empty());
        };

        match serde_json::from_str::<Cart>(&payload) {
            Ok(mut cart) => match cart.recompute_totals() {
                Ok(()) => Ok(cart),
                Err(error) => {
                    warn!(user = %user, %error, "discarding cart with unrepresentable totals");

                    Ok(Cart::empty())
                }
            },
            Err(error) => {
                warn!(user = %user, %error, "discarding undecodable cart");

                Ok(Cart::empty())
            }
        }
    }

    async fn save(&self, user: &UserId, mut cart: Cart) -> Result<Cart, CartsServiceError> {
        cart.refresh(Timestamp::now())?;

        let payload = serde_json::to_string(&cart).map_err(CartsServiceError::Encode)?;

        self.store
            .set_ex(&cart_key(user), &payload, self.ttl)
            .await?;

        debug!(
            user = %user,
            total_items = cart.total_items,
            "cart saved"
        );

        Ok(cart)
    }
}

fn validate_new_item(item: &NewCartItem) -> Result<u32, CartsServiceError> {
    if item.asin.trim().is_empty() || item.title.trim().is_empty() || item.price.is_zero() {
        return Err(CartsServiceError::MissingFields("asin, title, price"));
    }

    if item.price < Decimal::ZERO {
        return Err(CartsServiceError::InvalidPrice);
    }

    match u32::try_from(item.quantity) {
        Ok(quantity) if quantity >= 1 => Ok(quantity),
        _ => Err(CartsServiceError::InvalidQuantity),
    }
}

#[async_trait]
impl CartsService for KvCartsService {
    async fn get_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError> {
        Ok(self.load(user).await?)
    }

    async fn add_item(&self, user: &UserId, item: NewCartItem) -> Result<Cart, CartsServiceError> {
        let quantity = validate_new_item(&item)?;

        let _lock = self.locks.lock(user).await;

        let mut cart = self.load(user).await?;

        cart.add_item(item, quantity, Timestamp::now());

        self.save(user, cart).await
    }

    async fn update_item(
        &self,
        user: &UserId,
        update: CartItemUpdate,
    ) -> Result<Cart, CartsServiceError> {
        if update.asin.trim().is_empty() {
            return Err(CartsServiceError::MissingFields("asin, quantity"));
        }

        let _lock = self.locks.lock(user).await;

        let mut cart = self.load(user).await?;

        cart.update_item(&update)?;

        self.save(user, cart).await
    }

    async fn remove_item(&self, user: &UserId, asin: &str) -> Result<Cart, CartsServiceError> {
        let _lock = self.locks.lock(user).await;

        let mut cart = self.load(user).await?;

        cart.remove_item(asin)?;

        self.save(user, cart).await
    }

    async fn clear_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError> {
        let _lock = self.locks.lock(user).await;

        self.store.delete(&cart_key(user)).await?;

        Ok(Cart::empty())
    }

    async fn item_count(&self, user: &UserId) -> u64 {
        match self.load(user).await {
            Ok(cart) => cart.total_items,
            Err(error) => {
                warn!(user = %user, %error, "failed to read cart for count");

                0
            }
        }
    }

    async fn ping(&self) -> Result<(), CartsServiceError> {
        Ok(self.store.ping().await?)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a shopper's cart; shoppers without one get an empty cart.
    async fn get_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError>;

    /// Add an item, incrementing the quantity of an existing line.
    async fn add_item(&self, user: &UserId, item: NewCartItem) -> Result<Cart, CartsServiceError>;

    /// Overwrite a line's quantity; zero or less removes the line.
    async fn update_item(
        &self,
        user: &UserId,
        update: CartItemUpdate,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line.
    async fn remove_item(&self, user: &UserId, asin: &str) -> Result<Cart, CartsServiceError>;

    /// Delete the cart entirely.
    async fn clear_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError>;

    /// Total units in the cart; `0` when the cart cannot be read.
    async fn item_count(&self, user: &UserId) -> u64;

    /// Check the backing store is reachable.
    async fn ping(&self) -> Result<(), CartsServiceError>;
}

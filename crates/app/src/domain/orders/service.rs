//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::orders::{
        data::NewOrder,
        errors::OrdersServiceError,
        models::{Order, OrderItem},
        numbers::generate_order_number,
        repositories::{PgOrderItemsRepository, PgOrdersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }
}

/// Check every line and round prices to cents.
fn validate(order: &mut NewOrder) -> Result<(), OrdersServiceError> {
    if order.items.is_empty() {
        return Err(OrdersServiceError::EmptyOrder);
    }

    for (index, item) in order.items.iter_mut().enumerate() {
        let line = index + 1;

        if item.asin.trim().is_empty() {
            return Err(OrdersServiceError::InvalidItem(format!(
                "item {line}: asin is required"
            )));
        }

        item.price = item
            .price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        if item.price <= Decimal::ZERO {
            return Err(OrdersServiceError::InvalidItem(format!(
                "item {line}: price must be greater than zero"
            )));
        }

        if item.quantity < 1 || i32::try_from(item.quantity).is_err() {
            return Err(OrdersServiceError::InvalidItem(format!(
                "item {line}: quantity must be a positive integer"
            )));
        }

        if item.subtotal().is_none() {
            return Err(OrdersServiceError::InvalidItem(format!(
                "item {line}: subtotal is too large"
            )));
        }
    }

    Ok(())
}

fn attach_items(orders: &mut [Order], items: Vec<OrderItem>) {
    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();

    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    for order in orders {
        if let Some(items) = by_order.remove(&order.order_id) {
            order.items = items;
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, mut order: NewOrder) -> Result<Order, OrdersServiceError> {
        validate(&mut order)?;

        let total = order
            .total()
            .ok_or_else(|| OrdersServiceError::InvalidItem("order total is too large".to_string()))?;

        if let Some(client_total) = order.client_total
            && client_total != total
        {
            warn!(
                %client_total,
                %total,
                user = %order.user,
                "ignoring client-submitted order total"
            );
        }

        let order_number = generate_order_number(Timestamp::now(), &mut rand::thread_rng());
        let shipping = order.shipping.clone().resolve();

        let mut tx = self.db.begin().await?;

        let mut created = self
            .orders_repository
            .create_order(&mut tx, &order_number, &order, &shipping, total)
            .await?;

        for item in &order.items {
            let item = self
                .items_repository
                .create_order_item(&mut tx, created.order_id, item)
                .await?;

            created.items.push(item);
        }

        tx.commit().await?;

        info!(
            order_id = created.order_id,
            order_number = %created.order_number,
            items = created.items.len(),
            "order created"
        );

        Ok(created)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx).await?;

        let ids: Vec<i64> = orders.iter().map(|order| order.order_id).collect();

        let items = self
            .items_repository
            .list_items_for_orders(&mut tx, &ids)
            .await?;

        tx.commit().await?;

        attach_items(&mut orders, items);

        Ok(orders)
    }

    async fn get_order(&self, order_id: i64) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self
            .orders_repository
            .get_order(&mut tx, order_id)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        order.items = self
            .items_repository
            .list_items_for_orders(&mut tx, &[order_id])
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn cancel_order(&self, order_id: i64) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cancelled = self.orders_repository.cancel_order(&mut tx, order_id).await?;

        let Some(mut order) = cancelled else {
            let exists = self
                .orders_repository
                .get_order(&mut tx, order_id)
                .await?
                .is_some();

            return Err(if exists {
                OrdersServiceError::NotCancellable
            } else {
                OrdersServiceError::NotFound
            });
        };

        order.items = self
            .items_repository
            .list_items_for_orders(&mut tx, &[order_id])
            .await?;

        tx.commit().await?;

        info!(order_id, "order cancelled");

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Create an order and all its line items atomically.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// All orders, newest first, with their items.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order_id: i64) -> Result<Order, OrdersServiceError>;

    /// Move a pending or confirmed order to cancelled.
    async fn cancel_order(&self, order_id: i64) -> Result<Order, OrdersServiceError>;
}

//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::orders::{data::NewOrderItem, models::OrderItem};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i64,
        item: &NewOrderItem,
    ) -> Result<OrderItem, sqlx::Error> {
        let quantity = i32::try_from(item.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let subtotal = item
            .subtotal()
            .ok_or_else(|| sqlx::Error::Encode("order item subtotal overflows".into()))?;

        query_as::<Postgres, OrderItem>(CREATE_ORDER_ITEM_SQL)
            .bind(order_id)
            .bind(&item.asin)
            .bind(item.title_or_default())
            .bind(item.price)
            .bind(quantity)
            .bind(subtotal)
            .bind(item.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_items_for_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_ids: &[i64],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(LIST_ORDER_ITEMS_SQL)
            .bind(order_ids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_item_id: row.try_get("order_item_id")?,
            order_id: row.try_get("order_id")?,
            asin: row.try_get("asin")?,
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
            subtotal: row.try_get("subtotal")?,
            image_url: row.try_get("image_url")?,
        })
    }
}

//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::orders::{
    data::{NewOrder, ORDER_CURRENCY},
    models::{Order, OrderStatus, PaymentStatus, ShippingSnapshot},
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const CANCEL_ORDER_SQL: &str = include_str!("../sql/cancel_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
        order: &NewOrder,
        shipping: &ShippingSnapshot,
        total: Decimal,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.user.as_str())
            .bind(order_number)
            .bind(total)
            .bind(ORDER_CURRENCY)
            .bind(&shipping.name)
            .bind(&shipping.email)
            .bind(&shipping.address)
            .bind(&shipping.city)
            .bind(&shipping.state)
            .bind(&shipping.postal_code)
            .bind(&shipping.country)
            .bind(&shipping.phone)
            .bind(&shipping.payment_method)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i64,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Cancel a pending or confirmed order; `None` when no such order is cancellable.
    pub(crate) async fn cancel_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i64,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(CANCEL_ORDER_SQL)
            .bind(order_id)
            .fetch_optional(&mut **tx)
            .await
    }
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(col)?;

    value.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_id: row.try_get("order_id")?,
            order_number: row.try_get("order_number")?,
            user_id: row.try_get("user_id")?,
            status: try_get_parsed::<OrderStatus>(row, "status")?,
            total_amount: row.try_get("total_amount")?,
            currency: row.try_get("currency")?,
            shipping: ShippingSnapshot {
                name: row.try_get("shipping_name")?,
                email: row.try_get("shipping_email")?,
                address: row.try_get("shipping_address_line1")?,
                city: row.try_get("shipping_city")?,
                state: row.try_get("shipping_state")?,
                postal_code: row.try_get("shipping_postal_code")?,
                country: row.try_get("shipping_country")?,
                phone: row.try_get("shipping_phone")?,
                payment_method: row.try_get("payment_method")?,
            },
            payment_status: try_get_parsed::<PaymentStatus>(row, "payment_status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            items: Vec::new(),
        })
    }
}

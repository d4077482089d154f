//! Order Handlers

pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shopfront_app::domain::orders::models::{Order, OrderItem};

use crate::errors::ApiError;

/// Order line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub order_item_id: i64,
    pub order_id: i64,
    pub asin: String,
    pub title: String,

    /// Unit price at purchase, e.g. `"19.99"`
    pub price: String,

    pub quantity: i32,

    /// `price` times `quantity`
    pub subtotal: String,

    pub image_url: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            order_item_id: item.order_item_id,
            order_id: item.order_id,
            asin: item.asin,
            title: item.title,
            price: item.price.to_string(),
            quantity: item.quantity,
            subtotal: item.subtotal.to_string(),
            image_url: item.image_url,
        }
    }
}

/// Order with its lines
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub order_id: i64,

    /// Human-facing reference, `ORD-...`
    pub order_number: String,

    pub user_id: String,
    pub status: String,
    pub total_amount: String,
    pub currency: String,
    pub shipping_name: String,
    pub shipping_email: String,
    pub shipping_address_line1: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postal_code: String,
    pub shipping_country: String,
    pub shipping_phone: String,
    pub payment_method: String,
    pub payment_status: String,
    pub created_at: String,
    pub updated_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let shipping = order.shipping;

        Self {
            order_id: order.order_id,
            order_number: order.order_number,
            user_id: order.user_id,
            status: order.status.to_string(),
            total_amount: order.total_amount.to_string(),
            currency: order.currency,
            shipping_name: shipping.name,
            shipping_email: shipping.email,
            shipping_address_line1: shipping.address,
            shipping_city: shipping.city,
            shipping_state: shipping.state,
            shipping_postal_code: shipping.postal_code,
            shipping_country: shipping.country,
            shipping_phone: shipping.phone,
            payment_method: shipping.payment_method,
            payment_status: order.payment_status.as_str().to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub order: OrderResponse,
}

/// Response to an order write.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderUpdatedResponse {
    pub message: String,
    pub order: OrderResponse,
}

/// Order ids are numeric; anything else cannot name an order.
fn parse_order_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_ignored| ApiError::not_found("Order not found"))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use shopfront_app::domain::orders::{
        data::ShippingDetails,
        models::{Order, OrderItem, OrderStatus, PaymentStatus},
    };

    pub(super) fn make_order(order_id: i64, status: OrderStatus) -> Order {
        Order {
            order_id,
            order_number: format!("ORD-1700000000000-{order_id:03}"),
            user_id: "42".to_string(),
            status,
            total_amount: Decimal::new(3998, 2),
            currency: "USD".to_string(),
            shipping: ShippingDetails::default().resolve(),
            payment_status: PaymentStatus::Pending,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            items: vec![OrderItem {
                order_item_id: 1,
                order_id,
                asin: "A1".to_string(),
                title: "Desk Lamp".to_string(),
                price: Decimal::new(1999, 2),
                quantity: 2,
                subtotal: Decimal::new(3998, 2),
                image_url: None,
            }],
        }
    }
}

//! Cart Handlers

pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod count;
pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod update;

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shopfront_app::domain::carts::models::{Cart, CartItem};

/// Cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub asin: String,
    pub title: String,

    /// Unit price, e.g. `"19.99"`
    pub price: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub quantity: u32,
    pub added_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            asin: item.asin,
            title: item.title,
            price: item.price.to_string(),
            image: item.image,
            quantity: item.quantity,
            added_at: item.added_at.to_string(),
        }
    }
}

/// Cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,

    /// Sum of line quantities
    pub total_items: u64,

    /// Sum of price times quantity
    pub total_price: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.items.into_iter().map(Into::into).collect(),
            total_items: cart.total_items,
            total_price: cart.total_price.to_string(),
            updated_at: cart.updated_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    pub cart: CartResponse,
}

/// Response to a cart write.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartUpdatedResponse {
    pub message: String,
    pub cart: CartResponse,
}

impl CartUpdatedResponse {
    fn new(message: &str, cart: Cart) -> Self {
        Self {
            message: message.to_string(),
            cart: cart.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use shopfront_app::domain::carts::{data::NewCartItem, models::Cart};

    pub(super) fn make_cart(lines: &[(&str, i64, u32)]) -> Cart {
        let mut cart = Cart::empty();

        for (asin, cents, quantity) in lines {
            cart.add_item(
                NewCartItem {
                    asin: (*asin).to_string(),
                    title: format!("Product {asin}"),
                    price: Decimal::new(*cents, 2),
                    image: None,
                    quantity: i64::from(*quantity),
                },
                *quantity,
                Timestamp::UNIX_EPOCH,
            );
        }

        cart.refresh(Timestamp::UNIX_EPOCH).expect("fixture totals should fit");

        cart
    }
}

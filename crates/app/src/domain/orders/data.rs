//! Order Data

use rust_decimal::Decimal;

use crate::{auth::UserId, domain::orders::models::ShippingSnapshot};

/// Title stored for items submitted without one.
pub const DEFAULT_ITEM_TITLE: &str = "Product";

/// Currency of every order.
pub const ORDER_CURRENCY: &str = "USD";

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user: UserId,
    pub items: Vec<NewOrderItem>,

    /// Total as computed by the client; informational only.
    pub client_total: Option<Decimal>,

    pub shipping: ShippingDetails,
}

impl NewOrder {
    /// Server-side total: the sum of the line subtotals.
    ///
    /// `None` when a subtotal or the sum does not fit in a [`Decimal`].
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            item.subtotal().and_then(|subtotal| total.checked_add(subtotal))
        })
    }
}

/// New Order Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub asin: String,
    pub title: Option<String>,
    pub price: Decimal,
    pub quantity: i64,
    pub image_url: Option<String>,
}

impl NewOrderItem {
    /// `price * quantity`, or `None` on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(DEFAULT_ITEM_TITLE)
    }
}

/// Shipping details as submitted; any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub payment_method: Option<String>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl ShippingDetails {
    /// Fill absent fields with the guest checkout defaults.
    #[must_use]
    pub fn resolve(self) -> ShippingSnapshot {
        ShippingSnapshot {
            name: or_default(self.name, "Guest User"),
            email: or_default(self.email, "guest@example.com"),
            address: or_default(self.address, "N/A"),
            city: or_default(self.city, "N/A"),
            state: or_default(self.state, "N/A"),
            postal_code: or_default(self.postal_code, "00000"),
            country: or_default(self.country, "US"),
            phone: or_default(self.phone, "N/A"),
            payment_method: or_default(self.payment_method, "credit_card"),
        }
    }
}

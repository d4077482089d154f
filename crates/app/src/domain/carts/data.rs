//! Cart Data

use rust_decimal::Decimal;

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub asin: String,
    pub title: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub quantity: i64,
}

/// Cart Item Quantity Update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemUpdate {
    pub asin: String,

    /// Zero or negative removes the line.
    pub quantity: i64,
}

//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::carts::{
    CartsServiceError,
    data::{CartItemUpdate, NewCartItem},
};

/// Cart Model
///
/// Totals are derived from `items` by [`Cart::refresh`] and never trusted
/// from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,

    #[serde(default)]
    pub total_items: u64,

    #[serde(default)]
    pub total_price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub asin: String,
    pub title: String,
    pub price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub quantity: u32,
    pub added_at: Timestamp,
}

impl Cart {
    /// A cart with no lines, as returned for shoppers who never added anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, asin: &str) -> Option<usize> {
        self.items.iter().position(|item| item.asin == asin)
    }

    /// Add `quantity` units of `item`, incrementing an existing line with the same asin.
    ///
    /// `item.quantity` is ignored; callers pass the validated quantity.
    pub fn add_item(&mut self, item: NewCartItem, quantity: u32, now: Timestamp) {
        if let Some(line) = self.items.iter_mut().find(|line| line.asin == item.asin) {
            line.quantity = line.quantity.saturating_add(quantity);

            return;
        }

        self.items.push(CartItem {
            asin: item.asin,
            title: item.title,
            price: item.price,
            image: item.image,
            quantity,
            added_at: now,
        });
    }

    /// Overwrite a line's quantity; a quantity of zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::ItemNotFound`] when no line has the asin.
    pub fn update_item(&mut self, update: &CartItemUpdate) -> Result<(), CartsServiceError> {
        let index = self
            .position(&update.asin)
            .ok_or(CartsServiceError::ItemNotFound)?;

        if update.quantity <= 0 {
            self.items.remove(index);
        } else if let Some(line) = self.items.get_mut(index) {
            line.quantity = u32::try_from(update.quantity).unwrap_or(u32::MAX);
        }

        Ok(())
    }

    /// Remove the line with `asin`.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::ItemNotFound`] when no line has the asin.
    pub fn remove_item(&mut self, asin: &str) -> Result<(), CartsServiceError> {
        let index = self.position(asin).ok_or(CartsServiceError::ItemNotFound)?;

        self.items.remove(index);

        Ok(())
    }

    /// Recompute the derived totals.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::TotalOverflow`] when a line subtotal or the
    /// cart total does not fit in a [`Decimal`]; the totals are left untouched.
    pub fn recompute_totals(&mut self) -> Result<(), CartsServiceError> {
        let total_price = self
            .items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| {
                item.price
                    .checked_mul(Decimal::from(item.quantity))
                    .and_then(|subtotal| total.checked_add(subtotal))
            })
            .ok_or(CartsServiceError::TotalOverflow)?;

        self.total_items = self
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();
        self.total_price = total_price;

        Ok(())
    }

    /// Recompute totals and stamp the write time.
    ///
    /// # Errors
    ///
    /// See [`Cart::recompute_totals`].
    pub fn refresh(&mut self, now: Timestamp) -> Result<(), CartsServiceError> {
        self.recompute_totals()?;
        self.updated_at = Some(now);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    fn new_item(asin: &str, price: Decimal) -> NewCartItem {
        NewCartItem {
            asin: asin.to_string(),
            title: format!("Item {asin}"),
            price,
            image: None,
            quantity: 1,
        }
    }

    fn assert_totals_consistent(cart: &Cart) {
        let items: u64 = cart.items.iter().map(|i| u64::from(i.quantity)).sum();
        let price: Decimal = cart
            .items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();

        assert_eq!(cart.total_items, items, "totalItems drifted");
        assert_eq!(cart.total_price, price, "totalPrice drifted");
    }

    #[test]
    fn adding_existing_asin_increments_quantity() {
        let mut cart = Cart::empty();
        let now = Timestamp::now();

        cart.add_item(new_item("A1", dec(1999, 2)), 1, now);
        cart.add_item(new_item("A1", dec(1999, 2)), 2, now);
        cart.refresh(now).expect("totals should fit");

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|i| i.quantity), Some(3));
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_price, dec(5997, 2));
    }

    #[test]
    fn adding_new_asin_appends_one_line() {
        let mut cart = Cart::empty();
        let now = Timestamp::now();

        cart.add_item(new_item("A1", dec(500, 2)), 1, now);
        cart.add_item(new_item("B2", dec(250, 2)), 2, now);
        cart.refresh(now).expect("totals should fit");

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_price, dec(1000, 2));
    }

    #[test]
    fn update_to_zero_is_removal() {
        let now = Timestamp::now();
        let mut updated = Cart::empty();

        updated.add_item(new_item("A1", dec(100, 2)), 2, now);
        updated.add_item(new_item("B2", dec(300, 2)), 1, now);

        let mut removed = updated.clone();

        updated
            .update_item(&CartItemUpdate {
                asin: "A1".to_string(),
                quantity: 0,
            })
            .expect("update should succeed");

        removed.remove_item("A1").expect("remove should succeed");

        assert_eq!(updated.items, removed.items);
    }

    #[test]
    fn negative_quantity_removes_line() {
        let mut cart = Cart::empty();

        cart.add_item(new_item("A1", dec(100, 2)), 2, Timestamp::now());

        cart.update_item(&CartItemUpdate {
            asin: "A1".to_string(),
            quantity: -3,
        })
        .expect("update should succeed");

        assert!(cart.is_empty());
    }

    #[test]
    fn update_overwrites_quantity() {
        let mut cart = Cart::empty();

        cart.add_item(new_item("A1", dec(100, 2)), 2, Timestamp::now());

        cart.update_item(&CartItemUpdate {
            asin: "A1".to_string(),
            quantity: 7,
        })
        .expect("update should succeed");

        assert_eq!(cart.items.first().map(|i| i.quantity), Some(7));
    }

    #[test]
    fn update_and_remove_of_absent_asin_fail() {
        let mut cart = Cart::empty();

        let update = cart.update_item(&CartItemUpdate {
            asin: "missing".to_string(),
            quantity: 1,
        });

        assert!(matches!(update, Err(CartsServiceError::ItemNotFound)));
        assert!(matches!(
            cart.remove_item("missing"),
            Err(CartsServiceError::ItemNotFound)
        ));
    }

    #[test]
    fn totals_hold_over_random_mutations() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cart = Cart::empty();
        for _ in 0..500 {
            let asin = format!("A{}", rng.gen_range(0..4));
            let asin = asin.as_str();
            let now = Timestamp::now();

            match rng.gen_range(0..3) {
                0 => {
                    let cents = rng.gen_range(1..10_000);
                    let quantity = rng.gen_range(1..5);

                    cart.add_item(new_item(asin, dec(cents, 2)), quantity, now);
                }
                1 => {
                    let _ignored = cart.update_item(&CartItemUpdate {
                        asin: asin.to_string(),
                        quantity: rng.gen_range(-2..6),
                    });
                }
                _ => {
                    let _ignored = cart.remove_item(asin);
                }
            }

            cart.refresh(now).expect("totals should fit");

            assert_totals_consistent(&cart);
        }
    }

    #[test]
    fn stored_totals_are_not_trusted() {
        let mut cart: Cart = serde_json::from_str(
            r#"{
                "items": [{
                    "asin": "A1",
                    "title": "Lamp",
                    "price": "12.50",
                    "quantity": 2,
                    "addedAt": "2025-03-01T12:00:00Z"
                }],
                "totalItems": 99,
                "totalPrice": "0"
            }"#,
        )
        .expect("cart should decode");

        cart.recompute_totals().expect("totals should fit");

        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.total_price, dec(2500, 2));
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let mut cart = Cart::empty();
        let huge = Decimal::MAX / Decimal::TWO + Decimal::ONE;

        cart.add_item(new_item("A1", dec(100, 2)), 1, Timestamp::UNIX_EPOCH);
        cart.refresh(Timestamp::UNIX_EPOCH).expect("totals should fit");
        cart.add_item(new_item("B2", huge), 2, Timestamp::now());

        let result = cart.refresh(Timestamp::now());

        assert!(matches!(result, Err(CartsServiceError::TotalOverflow)));
        assert_eq!(cart.total_items, 1, "totals should be left as they were");
        assert_eq!(cart.total_price, dec(100, 2));
        assert_eq!(cart.updated_at, Some(Timestamp::UNIX_EPOCH));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let mut cart = Cart::empty();

        cart.add_item(new_item("A1", dec(100, 2)), 1, Timestamp::UNIX_EPOCH);
        cart.refresh(Timestamp::UNIX_EPOCH).expect("totals should fit");

        let value = serde_json::to_value(&cart).expect("cart should encode");

        assert_eq!(value["totalItems"], 1);
        assert_eq!(value["totalPrice"], "1.00");
        assert_eq!(value["items"][0]["addedAt"], "1970-01-01T00:00:00Z");
    }
}

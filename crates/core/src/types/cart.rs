//! Cart line items and pure cart operations.
//!
//! The cart is an ordered sequence of line items keyed by product ID.
//! Insertion order is preserved for display, and there is at most one line
//! per product: adding an already-present product increments its quantity.
//!
//! The total is always derived from the items, never stored, so it cannot
//! drift from its inputs. Arithmetic uses [`Decimal`] at full precision;
//! rounding to two decimal places is a display concern.
//!
//! Persistence and change notification live in the storefront crate; this
//! module is pure state manipulation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

/// Errors from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity below the minimum of 1. Driving a line to zero is a removal,
    /// which only `remove` performs.
    #[error("quantity must be at least 1 (got {0})")]
    QuantityTooLow(u32),

    /// Unit prices are non-negative.
    #[error("unit price must not be negative (got {0})")]
    NegativeUnitPrice(Decimal),
}

/// One product entry in the cart with its quantity.
///
/// Serialized field names match the device-local storage document
/// (`productId`, `unitPrice`, `imageRef`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product this line refers to; unique key within the cart.
    pub product_id: ProductId,
    /// Display name captured at add time.
    pub name: String,
    /// Price per unit in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Number of units; never below 1.
    pub quantity: u32,
    /// Reference to the product image shown in cart views.
    pub image_ref: String,
}

impl LineItem {
    /// Create a validated line item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityTooLow`] for a zero quantity and
    /// [`CartError::NegativeUnitPrice`] for a negative unit price.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        image_ref: impl Into<String>,
    ) -> Result<Self, CartError> {
        if quantity < 1 {
            return Err(CartError::QuantityTooLow(quantity));
        }
        if unit_price.is_sign_negative() {
            return Err(CartError::NegativeUnitPrice(unit_price));
        }
        Ok(Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity,
            image_ref: image_ref.into(),
        })
    }

    /// Price of this line: `unit_price * quantity`, full precision.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An ordered collection of line items, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from persisted line items.
    ///
    /// Restores the one-line-per-product invariant by merging duplicate
    /// product IDs into the first occurrence, and drops lines whose quantity
    /// is zero (a storage document edited by hand could contain either).
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity >= 1 {
                cart.add(item);
            }
        }
        cart
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add a line item.
    ///
    /// If the product is already present its quantity is incremented by the
    /// new line's quantity; otherwise the line is appended, preserving
    /// insertion order.
    pub fn add(&mut self, item: LineItem) {
        match self.line_mut(item.product_id) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// Returns `Ok(true)` if the line was updated and `Ok(false)` if the
    /// product is not in the cart (a silent no-op for the caller).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityTooLow`] for a zero quantity; the cart is
    /// left unchanged. Removal is an explicit `remove`, never a side effect
    /// of an update.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: u32,
    ) -> Result<bool, CartError> {
        if new_quantity < 1 {
            return Err(CartError::QuantityTooLow(new_quantity));
        }
        match self.line_mut(product_id) {
            Some(existing) => {
                existing.quantity = new_quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the line for a product.
    ///
    /// Returns whether a line was removed; removing an absent product is a
    /// no-op, so the operation is idempotent.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        self.items.len() < before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit_price * quantity` across all lines, full precision.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn item(id: i32, price: Decimal, quantity: u32) -> LineItem {
        LineItem::new(
            ProductId::new(id),
            format!("Product {id}"),
            price,
            quantity,
            format!("/images/{id}.png"),
        )
        .unwrap()
    }

    #[test]
    fn test_line_item_rejects_zero_quantity() {
        let result = LineItem::new(ProductId::new(1), "Widget", dec!(9.99), 0, "w.png");
        assert_eq!(result.unwrap_err(), CartError::QuantityTooLow(0));
    }

    #[test]
    fn test_line_item_rejects_negative_price() {
        let result = LineItem::new(ProductId::new(1), "Widget", dec!(-1), 1, "w.png");
        assert!(matches!(
            result.unwrap_err(),
            CartError::NegativeUnitPrice(_)
        ));
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        cart.add(item(1, dec!(10), 2));
        cart.add(item(1, dec!(10), 3));
        cart.add(item(1, dec!(10), 1));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 6);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(item(3, dec!(1), 1));
        cart.add(item(1, dec!(1), 1));
        cart.add(item(2, dec!(1), 1));
        cart.add(item(1, dec!(1), 1));

        let ids: Vec<i32> = cart
            .items()
            .iter()
            .map(|line| line.product_id.as_i32())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_update_quantity_zero_is_rejected_not_removed() {
        let mut cart = Cart::new();
        cart.add(item(1, dec!(10), 2));

        let result = cart.update_quantity(ProductId::new(1), 0);
        assert_eq!(result.unwrap_err(), CartError::QuantityTooLow(0));
        // The line is untouched: removal is remove()'s job, not an update.
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_absent_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(item(1, dec!(10), 2));

        assert!(!cart.update_quantity(ProductId::new(99), 5).unwrap());
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(item(1, dec!(10), 2));

        assert!(cart.remove(ProductId::new(1)));
        assert!(!cart.remove(ProductId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_of_mixed_cart() {
        // [{id:1, price:10, qty:2}, {id:2, price:5, qty:1}] totals 25.00
        let mut cart = Cart::new();
        cart.add(item(1, dec!(10), 2));
        cart.add(item(2, dec!(5), 1));

        assert_eq!(cart.total(), dec!(25));
        // Two decimal places exist only in display formatting.
        assert_eq!(format!("{:.2}", cart.total()), "25.00");
    }

    #[test]
    fn test_total_invariant_under_reordering() {
        // Two operation orders producing the same (product, quantity) multiset.
        let mut first = Cart::new();
        first.add(item(1, dec!(2.50), 1));
        first.add(item(2, dec!(4), 2));
        first.add(item(1, dec!(2.50), 2));
        first.remove(ProductId::new(2));
        first.add(item(2, dec!(4), 2));

        let mut second = Cart::new();
        second.add(item(2, dec!(4), 2));
        second.add(item(1, dec!(2.50), 3));

        assert_eq!(first.total(), second.total());
    }

    #[test]
    fn test_total_retains_full_precision() {
        let mut cart = Cart::new();
        cart.add(item(1, dec!(0.105), 3));

        assert_eq!(cart.total(), dec!(0.315));
        assert_eq!(cart.total().round_dp(2).to_string(), "0.32");
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(item(1, dec!(1), 2));
        cart.add(item(2, dec!(1), 5));
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_from_items_merges_duplicates_and_drops_zeroes() {
        let mut zero = item(2, dec!(1), 1);
        zero.quantity = 0;
        let cart = Cart::from_items(vec![
            item(1, dec!(2), 1),
            zero,
            item(1, dec!(2), 4),
        ]);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_storage_document_shape() {
        let mut cart = Cart::new();
        cart.add(item(1, dec!(19.99), 2));

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "productId": 1,
                "name": "Product 1",
                "unitPrice": 19.99,
                "quantity": 2,
                "imageRef": "/images/1.png",
            }])
        );

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}

//! # Cart
//!
//! The customer's cart for one restaurant.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action              Cart Method             Effect                  │
//! │  ─────────              ───────────             ──────                  │
//! │  "Add" on menu card ──► add_item()  ──────────► new line, or qty += n  │
//! │  "+" on cart line ────► increment() ──────────► qty += 1               │
//! │  "−" on cart line ────► decrement() ──────────► qty −= 1, gone at 0    │
//! │  Quantity box ────────► set_quantity() ───────► qty = n, gone at 0     │
//! │  "×" on cart line ────► remove_item() ────────► line removed           │
//! │  Order placed ────────► clear() ──────────────► empty                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `menu_item_id`
//! - Every quantity is in `1..=MAX_ITEM_QUANTITY`
//! - At most `MAX_CART_LINES` lines
//! - Unit price is frozen when the line is created

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::MenuItem;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartLine;
use crate::validation::validate_quantity;
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY};

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item_id: String,

    /// Dish name at time of adding (frozen).
    pub name: String,

    /// Price at time of adding (frozen).
    pub unit_price: Money,

    pub quantity: i64,

    /// Free-text request, e.g. "extra spicy".
    pub customizations: Option<String>,
}

impl CartItem {
    /// Creates a line from a menu item, freezing its name and price.
    pub fn from_menu_item(item: &MenuItem, quantity: i64) -> Self {
        CartItem {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
            customizations: None,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// The calculator's view of this line.
    pub fn to_cart_line(&self) -> CartLine {
        CartLine::new(self.menu_item_id.clone(), self.unit_price, self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from previously ordered lines (reorder).
    ///
    /// Lines for the same dish are merged; invalid quantities are rejected.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> CoreResult<Self> {
        let mut cart = Cart::new();
        for item in items {
            validate_quantity(item.quantity)?;
            if let Some(existing) = cart.find_mut(&item.menu_item_id) {
                let merged = existing.quantity + item.quantity;
                check_quantity_limit(merged)?;
                existing.quantity = merged;
            } else {
                if cart.items.len() >= MAX_CART_LINES {
                    return Err(CoreError::CartTooLarge {
                        max: MAX_CART_LINES,
                    });
                }
                cart.items.push(item);
            }
        }
        Ok(cart)
    }

    /// Adds a menu item or increases its quantity if already present.
    pub fn add_item(&mut self, item: &MenuItem, quantity: i64) -> CoreResult<()> {
        if !item.available {
            return Err(CoreError::MenuItemUnavailable {
                name: item.name.clone(),
            });
        }
        validate_quantity(quantity)?;

        if let Some(line) = self.find_mut(&item.id) {
            let new_qty = line.quantity + quantity;
            check_quantity_limit(new_qty)?;
            line.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.items.push(CartItem::from_menu_item(item, quantity));
        Ok(())
    }

    /// Adds one to a line's quantity.
    pub fn increment(&mut self, menu_item_id: &str) -> CoreResult<()> {
        let line = self
            .find_mut(menu_item_id)
            .ok_or_else(|| CoreError::LineNotInCart(menu_item_id.to_string()))?;
        check_quantity_limit(line.quantity + 1)?;
        line.quantity += 1;
        Ok(())
    }

    /// Takes one from a line's quantity; a line at 1 is removed.
    pub fn decrement(&mut self, menu_item_id: &str) -> CoreResult<()> {
        let line = self
            .find_mut(menu_item_id)
            .ok_or_else(|| CoreError::LineNotInCart(menu_item_id.to_string()))?;
        if line.quantity <= 1 {
            return self.remove_item(menu_item_id);
        }
        line.quantity -= 1;
        Ok(())
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(menu_item_id);
        }
        validate_quantity(quantity)?;

        let line = self
            .find_mut(menu_item_id)
            .ok_or_else(|| CoreError::LineNotInCart(menu_item_id.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Attaches a customization note to a line. Blank notes clear it.
    pub fn set_customizations(&mut self, menu_item_id: &str, note: &str) -> CoreResult<()> {
        let line = self
            .find_mut(menu_item_id)
            .ok_or_else(|| CoreError::LineNotInCart(menu_item_id.to_string()))?;
        let note = note.trim();
        line.customizations = (!note.is_empty()).then(|| note.to_string());
        Ok(())
    }

    /// Removes a line by menu item id.
    pub fn remove_item(&mut self, menu_item_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.menu_item_id != menu_item_id);

        if self.items.len() == initial_len {
            Err(CoreError::LineNotInCart(menu_item_id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Quantity of one dish, zero when absent.
    pub fn quantity_of(&self, menu_item_id: &str) -> i64 {
        self.items
            .iter()
            .find(|i| i.menu_item_id == menu_item_id)
            .map_or(0, |i| i.quantity)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across lines (the badge on the cart icon).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The lines in the shape the pricing calculator expects.
    pub fn lines(&self) -> Vec<CartLine> {
        self.items.iter().map(CartItem::to_cart_line).collect()
    }

    fn find_mut(&mut self, menu_item_id: &str) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|i| i.menu_item_id == menu_item_id)
    }
}

fn check_quantity_limit(quantity: i64) -> CoreResult<()> {
    if quantity > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        Catalog::demo()
    }

    #[test]
    fn test_add_item() {
        let catalog = catalog();
        let mut cart = Cart::new();

        cart.add_item(catalog.menu_item("1").unwrap(), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().amount(), dec!(29.98));
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let item = catalog.menu_item("6").unwrap();

        cart.add_item(item, 1).unwrap();
        cart.add_item(item, 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("6"), 3);
    }

    #[test]
    fn test_unavailable_item_rejected() {
        let mut item = catalog().menu_item("1").unwrap().clone();
        item.available = false;

        let err = Cart::new().add_item(&item, 1).unwrap_err();
        assert!(matches!(err, CoreError::MenuItemUnavailable { .. }));
    }

    #[test]
    fn test_increment_and_decrement() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.menu_item("4").unwrap(), 1).unwrap();

        cart.increment("4").unwrap();
        assert_eq!(cart.quantity_of("4"), 2);

        cart.decrement("4").unwrap();
        assert_eq!(cart.quantity_of("4"), 1);

        // Decrementing the last one removes the line
        cart.decrement("4").unwrap();
        assert!(cart.is_empty());

        assert!(matches!(cart.decrement("4"), Err(CoreError::LineNotInCart(_))));
    }

    #[test]
    fn test_quantity_limit() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let item = catalog.menu_item("8").unwrap();

        cart.add_item(item, MAX_ITEM_QUANTITY).unwrap();
        assert!(matches!(
            cart.increment("8"),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(cart.add_item(item, 0).is_err());
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.menu_item("2").unwrap(), 3).unwrap();

        cart.set_quantity("2", 5).unwrap();
        assert_eq!(cart.quantity_of("2"), 5);

        cart.set_quantity("2", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_customizations() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.menu_item("1").unwrap(), 1).unwrap();

        cart.set_customizations("1", "  extra spicy ").unwrap();
        assert_eq!(cart.items[0].customizations.as_deref(), Some("extra spicy"));

        cart.set_customizations("1", "   ").unwrap();
        assert_eq!(cart.items[0].customizations, None);
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut item = catalog().menu_item("1").unwrap().clone();
        let mut cart = Cart::new();
        cart.add_item(&item, 1).unwrap();

        item.price = Money::from_minor(9999);
        cart.add_item(&item, 1).unwrap();

        assert_eq!(cart.items[0].unit_price, Money::from_minor(1499));
    }

    #[test]
    fn test_from_items_merges_duplicates() {
        let catalog = catalog();
        let naan = CartItem::from_menu_item(catalog.menu_item("6").unwrap(), 1);
        let cart = Cart::from_items(vec![naan.clone(), naan]).unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("6"), 2);
    }

    #[test]
    fn test_lines_for_pricing() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.menu_item("1").unwrap(), 2).unwrap();
        cart.add_item(catalog.menu_item("6").unwrap(), 1).unwrap();

        let lines = cart.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, "1");
        assert_eq!(lines[1].quantity, 1);
    }
}

//! # Cart State
//!
//! Holds the customer's cart between commands.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands read and modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Commands may be called from any task
//!
//! ## One Restaurant Per Cart
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart for "spice-garden"                                               │
//! │      │                                                                  │
//! │      │  add item from "pizza-perfetto"                                  │
//! │      ▼                                                                  │
//! │  Cart cleared, now for "pizza-perfetto"                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use rasoi_core::{Cart, Money};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The cart plus the restaurant it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSession {
    pub restaurant_slug: Option<String>,
    pub cart: Cart,
}

impl CartSession {
    /// Makes sure the cart belongs to `restaurant_slug`, emptying it when the
    /// customer switches restaurant.
    pub fn bind_to(&mut self, restaurant_slug: &str) {
        if self.restaurant_slug.as_deref() == Some(restaurant_slug) {
            return;
        }

        if !self.cart.is_empty() {
            info!(
                from = ?self.restaurant_slug,
                to = %restaurant_slug,
                "Switching restaurant, clearing cart"
            );
            self.cart.clear();
        }
        self.restaurant_slug = Some(restaurant_slug.to_string());
    }

    /// Replaces the cart wholesale (reorder).
    pub fn replace(&mut self, restaurant_slug: String, cart: Cart) {
        self.restaurant_slug = Some(restaurant_slug);
        self.cart = cart;
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.restaurant_slug = None;
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

/// Shared cart state.
///
/// ## Why Not RwLock?
/// Cart operations are quick and most of them modify state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    session: Arc<Mutex<CartSession>>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartSession) -> R,
    {
        let session = self.session.lock().expect("Cart mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|s| s.cart.add_item(item, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartSession) -> R,
    {
        let mut session = self.session.lock().expect("Cart mutex poisoned");
        f(&mut session)
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(|s| s.cart.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasoi_core::Catalog;

    #[test]
    fn test_switching_restaurant_clears_cart() {
        let catalog = Catalog::demo();
        let state = CartState::new();

        state.with_cart_mut(|s| {
            s.bind_to("spice-garden");
            s.cart.add_item(catalog.menu_item("1").unwrap(), 1).unwrap();
        });

        // Same restaurant keeps the cart
        state.with_cart_mut(|s| s.bind_to("spice-garden"));
        assert_eq!(state.snapshot().line_count(), 1);

        state.with_cart_mut(|s| s.bind_to("pizza-perfetto"));
        assert!(state.snapshot().is_empty());
        assert_eq!(
            state.with_cart(|s| s.restaurant_slug.clone()).as_deref(),
            Some("pizza-perfetto")
        );
    }

    #[test]
    fn test_totals() {
        let catalog = Catalog::demo();
        let state = CartState::new();
        state.with_cart_mut(|s| {
            s.cart.add_item(catalog.menu_item("1").unwrap(), 2).unwrap();
            s.cart.add_item(catalog.menu_item("6").unwrap(), 1).unwrap();
        });

        let totals = state.with_cart(|s| CartTotals::from(&s.cart));
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal, Money::from_minor(3347));
    }

    #[test]
    fn test_clones_share_the_cart() {
        let catalog = Catalog::demo();
        let state = CartState::new();
        let other = state.clone();

        other.with_cart_mut(|s| s.cart.add_item(catalog.menu_item("8").unwrap(), 1).unwrap());
        assert_eq!(state.snapshot().total_quantity(), 1);
    }
}

//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Placed  │       │
//! │  │  Cart    │     │          │     │  steps   │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                        place_order        │
//! │                   increment_item                     (checkout.rs)      │
//! │                   decrement_item                          │             │
//! │                   remove_from_cart                        │             │
//! │                        │                                  ▼             │
//! │                   clear_cart ───────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rasoi_core::CartItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartSession, CartState, CartTotals, CatalogState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub restaurant_slug: Option<String>,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&CartSession> for CartResponse {
    fn from(session: &CartSession) -> Self {
        CartResponse {
            restaurant_slug: session.restaurant_slug.clone(),
            items: session.cart.items.clone(),
            totals: CartTotals::from(&session.cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|s| CartResponse::from(s))
}

/// Adds a dish from a restaurant's menu.
///
/// ## Behavior
/// - Dish already in cart: quantity increases
/// - Dish not in cart: added with its current name and price frozen
/// - Cart belongs to another restaurant: cart is emptied first
///
/// ## Arguments
/// * `restaurant_slug` - Restaurant whose page the dish was added from
/// * `menu_item_id` - Dish to add
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    restaurant_slug: String,
    menu_item_id: String,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(
        restaurant = %restaurant_slug,
        menu_item_id = %menu_item_id,
        quantity,
        "add_to_cart command"
    );

    let restaurant = catalog.catalog().restaurant_by_slug(&restaurant_slug)?;
    let item = catalog.catalog().menu_item(&menu_item_id)?;

    cart.with_cart_mut(|s| {
        s.bind_to(&restaurant.slug);
        s.cart.add_item(item, quantity)?;
        Ok(CartResponse::from(&*s))
    })
}

/// The "+" button on a cart line.
pub fn increment_item(cart: &CartState, menu_item_id: String) -> Result<CartResponse, ApiError> {
    debug!(menu_item_id = %menu_item_id, "increment_item command");
    cart.with_cart_mut(|s| {
        s.cart.increment(&menu_item_id)?;
        Ok(CartResponse::from(&*s))
    })
}

/// The "-" button on a cart line. The line is removed at zero.
pub fn decrement_item(cart: &CartState, menu_item_id: String) -> Result<CartResponse, ApiError> {
    debug!(menu_item_id = %menu_item_id, "decrement_item command");
    cart.with_cart_mut(|s| {
        s.cart.decrement(&menu_item_id)?;
        Ok(CartResponse::from(&*s))
    })
}

/// Sets the exact quantity of a line.
pub fn update_item_quantity(
    cart: &CartState,
    menu_item_id: String,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(menu_item_id = %menu_item_id, quantity, "update_item_quantity command");
    cart.with_cart_mut(|s| {
        s.cart.set_quantity(&menu_item_id, quantity)?;
        Ok(CartResponse::from(&*s))
    })
}

/// Attaches a note such as "extra spicy" to a line.
pub fn set_item_note(
    cart: &CartState,
    menu_item_id: String,
    note: String,
) -> Result<CartResponse, ApiError> {
    debug!(menu_item_id = %menu_item_id, "set_item_note command");
    cart.with_cart_mut(|s| {
        s.cart.set_customizations(&menu_item_id, &note)?;
        Ok(CartResponse::from(&*s))
    })
}

pub fn remove_from_cart(cart: &CartState, menu_item_id: String) -> Result<CartResponse, ApiError> {
    debug!(menu_item_id = %menu_item_id, "remove_from_cart command");
    cart.with_cart_mut(|s| {
        s.cart.remove_item(&menu_item_id)?;
        Ok(CartResponse::from(&*s))
    })
}

pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|s| {
        s.clear();
        CartResponse::from(&*s)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rasoi_core::Money;

    fn add(catalog: &CatalogState, cart: &CartState, slug: &str, id: &str, qty: i64) -> CartResponse {
        add_to_cart(catalog, cart, slug.to_string(), id.to_string(), Some(qty)).unwrap()
    }

    #[test]
    fn test_get_cart() {
        let catalog = CatalogState::demo();
        let cart = CartState::new();
        assert!(get_cart(&cart).items.is_empty());

        add(&catalog, &cart, "spice-garden", "8", 3);
        let response = get_cart(&cart);
        assert_eq!(response.restaurant_slug.as_deref(), Some("spice-garden"));
        assert_eq!(response.totals.total_quantity, 3);
    }

    #[test]
    fn test_add_and_totals() {
        let catalog = CatalogState::demo();
        let cart = CartState::new();

        add(&catalog, &cart, "spice-garden", "1", 2);
        let response = add(&catalog, &cart, "spice-garden", "6", 1);

        assert_eq!(response.restaurant_slug.as_deref(), Some("spice-garden"));
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.totals.subtotal, Money::from_minor(3347));
    }

    #[test]
    fn test_add_same_dish_merges() {
        let catalog = CatalogState::demo();
        let cart = CartState::new();

        add(&catalog, &cart, "spice-garden", "1", 1);
        let response = add_to_cart(&catalog, &cart, "spice-garden".into(), "1".into(), None).unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 2);
    }

    #[test]
    fn test_switching_restaurant_empties_cart() {
        let catalog = CatalogState::demo();
        let cart = CartState::new();

        add(&catalog, &cart, "spice-garden", "1", 2);
        let response = add(&catalog, &cart, "thai-fusion", "8", 1);

        assert_eq!(response.restaurant_slug.as_deref(), Some("thai-fusion"));
        assert_eq!(response.totals.total_quantity, 1);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let catalog = CatalogState::demo();
        let cart = CartState::new();

        add(&catalog, &cart, "spice-garden", "4", 1);
        let response = decrement_item(&cart, "4".to_string()).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_errors() {
        let catalog = CatalogState::demo();
        let cart = CartState::new();

        let err = add_to_cart(&catalog, &cart, "spice-garden".into(), "99".into(), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&catalog, &cart, "spice-garden".into(), "1".into(), Some(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = increment_item(&cart, "1".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_clear_cart() {
        let catalog = CatalogState::demo();
        let cart = CartState::new();

        add(&catalog, &cart, "spice-garden", "1", 1);
        let response = clear_cart(&cart);
        assert!(response.items.is_empty());
        assert_eq!(response.restaurant_slug, None);
    }
}

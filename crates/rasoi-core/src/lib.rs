//! # rasoi-core: Pure Business Logic for the OrpRasoi Storefront
//!
//! Everything the storefront decides (prices, promotions, what is in the
//! cart, which checkout step comes next, what a search matches) lives here as
//! plain functions over plain data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrpRasoi Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web UI (views)                               │   │
//! │  │    Landing ──► Restaurant ──► Checkout ──► Confirmation        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront (app crate)                      │   │
//! │  │    add_to_cart, apply_promo_code, place_order, open_chat     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rasoi-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │ promotion │  │   cart    │  │ checkout  │  │   │
//! │  │   │  price()  │  │ Registry  │  │   Cart    │  │ Session   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  search   │  │   order   │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO TIMERS • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal money, rounded only for display
//! - [`pricing`] - The order pricing and discount calculator
//! - [`promotion`] - Promotion code lookup and qualification
//! - [`cart`] - The customer's cart
//! - [`checkout`] - Three-step checkout state machine
//! - [`catalog`] - Restaurants and menu items
//! - [`search`] - Restaurant and dish search
//! - [`order`] - Placed orders, tracking and order numbers
//! - [`validation`] - Customer input checks
//! - [`fixtures`] - Demo data
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rasoi_core::{price, Cart, Catalog, FulfillmentMode, PromotionRegistry};
//!
//! let catalog = Catalog::demo();
//! let mut cart = Cart::new();
//! cart.add_item(catalog.menu_item("1")?, 2)?; // Butter Chicken £14.99
//! cart.add_item(catalog.menu_item("6")?, 1)?; // Garlic Naan £3.49
//!
//! let registry = PromotionRegistry::demo();
//! let save10 = registry.lookup("save10")?;
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//!
//! let summary = price(&cart.lines(), FulfillmentMode::Delivery, Some(save10), today);
//! assert_eq!(summary.total.to_string(), "£34.60");
//! # Ok::<(), rasoi_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod fixtures;
pub mod money;
pub mod order;
pub mod pricing;
pub mod promotion;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, MenuItem, Restaurant};
pub use checkout::{CheckoutSession, CheckoutStep, ContactDetails, PlacedOrder};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderStatus};
pub use pricing::{price, FeeSchedule};
pub use promotion::{PromotionRegistry, PromotionRejection};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single dish in the cart.
///
/// Matches the two-digit quantity box on the cart drawer.
pub const MAX_ITEM_QUANTITY: i64 = 99;

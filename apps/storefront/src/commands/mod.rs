//! # Commands Module
//!
//! Every operation the web UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Restaurant listing and menus
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Checkout steps, promo codes, placing the order
//! ├── order.rs     ◄─── History, tracking, reorder, chat
//! ├── search.rs    ◄─── Search and landing-page lists
//! ├── session.rs   ◄─── Navigation between views
//! └── config.rs    ◄─── Store settings for the UI
//! ```
//!
//! ## State Injection
//! Each command takes only the stores it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs the catalog to look up the dish, and the cart to add it
//! fn add_to_cart(catalog: &CatalogState, cart: &CartState, ...) -> Result<CartResponse, ApiError>
//! ```

use chrono::{Local, NaiveDate};

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod order;
pub mod search;
pub mod session;

/// The customer's local date, used for promotion expiry and order dates.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

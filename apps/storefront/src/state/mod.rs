//! # State Module
//!
//! Storefront state, split into one store per concern so each command
//! declares exactly what it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │ CatalogState │  │  CartState   │  │CheckoutState │                  │
//! │  │  Arc<..>     │  │  Arc<Mutex<  │  │  Arc<Mutex<  │                  │
//! │  │  read-only   │  │  CartSession │  │  Option<..>  │                  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘                  │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  OrderState  │  │ SessionState │  │ StorefrontConfig │              │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  read-only       │              │
//! │  │  OrderBook   │  │  View        │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod checkout;
mod config;
mod orders;
mod session;

pub use cart::{CartSession, CartState, CartTotals};
pub use catalog::CatalogState;
pub use checkout::CheckoutState;
pub use config::{ChatSettings, FeeSettings, OrderSettings, StoreSettings, StorefrontConfig};
pub use orders::{OrderBook, OrderState};
pub use session::{SessionState, View};

//! # OrpRasoi Storefront Library
//!
//! The application layer of the storefront: session stores, the commands
//! the web UI invokes, and the order chat.
//!
//! ## Module Organization
//! ```text
//! rasoi_storefront/
//! ├── lib.rs          ◄─── You are here (wiring & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Restaurants, menu, promo codes (read-only)
//! │   ├── cart.rs     ◄─── Cart bound to one restaurant
//! │   ├── checkout.rs ◄─── Checkout in progress
//! │   ├── orders.rs   ◄─── Placed orders and order numbers
//! │   ├── session.rs  ◄─── Current view
//! │   └── config.rs   ◄─── storefront.toml + RASOI_* env
//! ├── commands/       ◄─── One module per page
//! ├── chat.rs         ◄─── Order chat with delayed auto-reply
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! All pricing and checkout rules live in `rasoi-core`; this crate only
//! holds state between calls and reads the clock.

pub mod chat;
pub mod commands;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

use state::{CartState, CatalogState, CheckoutState, OrderState, SessionState, StorefrontConfig};

/// Every store a storefront session needs, built once at startup.
///
/// Each field is cheap to clone and shares its data with the original.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub config: StorefrontConfig,
    pub catalog: CatalogState,
    pub cart: CartState,
    pub checkout: CheckoutState,
    pub orders: OrderState,
    pub session: SessionState,
}

impl Storefront {
    /// A storefront over the demo catalog and the demo customer's history.
    pub fn demo(config: StorefrontConfig) -> Self {
        let orders = OrderState::demo(&config.orders.number_prefix);

        Storefront {
            catalog: CatalogState::demo(),
            cart: CartState::new(),
            checkout: CheckoutState::new(),
            orders,
            session: SessionState::new(),
            config,
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rasoi_storefront=trace` - Trace the storefront only
/// - Default: INFO, DEBUG for the rasoi crates
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rasoi=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

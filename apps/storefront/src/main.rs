//! # OrpRasoi Storefront Entry Point
//!
//! Runs a scripted customer session against the demo catalog and logs
//! every page the customer would see.
//!
//! ## Usage
//! ```text
//! rasoi-storefront [path/to/storefront.toml]
//! RUST_LOG=debug rasoi-storefront
//! ```

use std::path::PathBuf;

use rasoi_core::{ContactDetails, PaymentMethod};
use rasoi_storefront::commands::{cart, catalog, checkout, order, search};
use rasoi_storefront::error::ApiError;
use rasoi_storefront::state::StorefrontConfig;
use rasoi_storefront::Storefront;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    rasoi_storefront::init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = StorefrontConfig::load_or_default(config_path);
    info!(store = %config.store.name, "Starting storefront demo");

    let store = Storefront::demo(config);
    if let Err(e) = run(&store).await {
        error!(error = %e, "Demo session failed");
        std::process::exit(1);
    }
}

async fn run(store: &Storefront) -> Result<(), ApiError> {
    // Landing page
    let restaurants = catalog::list_restaurants(&store.catalog);
    info!(count = restaurants.len(), "Restaurants listed");

    let results = search::search(&store.catalog, &store.session, "naan".to_string(), None)?;
    info!(
        query = %results.query,
        matches = results.total_count(),
        "Search results"
    );

    // Restaurant page
    let page = catalog::get_restaurant(&store.catalog, &store.session, "spice-garden".to_string())?;
    info!(
        restaurant = %page.restaurant.name,
        sections = page.sections.len(),
        "Restaurant opened"
    );

    let slug = page.restaurant.slug.clone();
    cart::add_to_cart(&store.catalog, &store.cart, slug.clone(), "1".to_string(), Some(2))?;
    let basket = cart::add_to_cart(&store.catalog, &store.cart, slug.clone(), "6".to_string(), None)?;
    info!(
        items = basket.totals.total_quantity,
        subtotal = %store.config.format_currency(basket.totals.subtotal),
        "Cart updated"
    );

    // Checkout
    checkout::start_checkout(
        &store.catalog,
        &store.cart,
        &store.checkout,
        &store.session,
        &store.config,
        slug,
    )?;
    checkout::continue_checkout(&store.cart, &store.checkout, &store.config)?;
    checkout::set_contact_details(
        &store.cart,
        &store.checkout,
        &store.config,
        ContactDetails {
            name: "Priya Sharma".to_string(),
            phone: "07700 900123".to_string(),
            email: "priya@example.com".to_string(),
            address: "221B Baker Street".to_string(),
            postcode: "NW1 6XE".to_string(),
            instructions: None,
        },
    )?;
    checkout::continue_checkout(&store.cart, &store.checkout, &store.config)?;
    checkout::set_payment_method(&store.cart, &store.checkout, &store.config, PaymentMethod::Card)?;

    let quote = checkout::apply_promo_code(
        &store.catalog,
        &store.cart,
        &store.checkout,
        &store.config,
        "SAVE10".to_string(),
    )?;
    info!(
        subtotal = %quote.display.subtotal,
        discount = %quote.display.discount,
        delivery = %quote.display.delivery_fee,
        service = %quote.display.service_fee,
        total = %quote.display.total,
        "Order summary"
    );

    let confirmation = checkout::place_order(
        &store.cart,
        &store.checkout,
        &store.orders,
        &store.session,
        &store.config,
    )?;
    let order_number = confirmation.order.order_number.clone();
    info!(
        order_number = %order_number,
        total = %confirmation.display.total,
        eta = %confirmation.estimated_time,
        "Order confirmed"
    );

    // Tracking page with chat
    let tracking = order::track_order(&store.orders, &store.session, &store.config, order_number.clone())?;
    info!(status = %tracking.order.status, percent = tracking.tracking.percent, "Tracking");

    let mut chat = order::open_chat(&store.orders, &store.config, order_number.clone())?;
    chat.send("Could you make it extra spicy?")?;
    tokio::time::sleep(store.config.chat.auto_reply_delay() + std::time::Duration::from_millis(100)).await;
    for message in chat.messages()? {
        info!(sender = ?message.sender, message = %message.message, "Chat");
    }
    chat.close();

    while order::advance_order_status(&store.orders, order_number.clone())?.percent < 100 {}
    let tracking = order::track_order(&store.orders, &store.session, &store.config, order_number)?;
    info!(status = %tracking.order.status, percent = tracking.tracking.percent, "Tracking");

    // Account page
    for past in order::order_history(&store.orders, &store.session) {
        info!(
            order_number = %past.order_number,
            restaurant = %past.restaurant_name,
            total = %past.total,
            status = %past.status,
            "Past order"
        );
    }

    Ok(())
}

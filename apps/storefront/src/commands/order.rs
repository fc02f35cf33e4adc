//! # Order Commands
//!
//! Account history, tracking, reorder and the order chat.

use rasoi_core::order::{reorder as rebuild_cart, TrackingProgress};
use rasoi_core::Order;
use serde::Serialize;
use tracing::{debug, info};

use super::cart::CartResponse;
use crate::chat::ChatThread;
use crate::error::ApiError;
use crate::state::{CartState, CatalogState, OrderState, SessionState, StorefrontConfig, View};

/// The tracking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub order: Order,
    pub tracking: TrackingProgress,
    pub estimated_time: String,
}

/// Past orders, newest first.
pub fn order_history(orders: &OrderState, session: &SessionState) -> Vec<Order> {
    debug!("order_history command");
    session.navigate(View::Account);
    orders.with_book(|b| b.history())
}

pub fn get_order(orders: &OrderState, order_number: String) -> Result<Order, ApiError> {
    debug!(order_number = %order_number, "get_order command");
    orders.order(&order_number)
}

/// Opens the tracking page for an order.
pub fn track_order(
    orders: &OrderState,
    session: &SessionState,
    config: &StorefrontConfig,
    order_number: String,
) -> Result<TrackingResponse, ApiError> {
    debug!(order_number = %order_number, "track_order command");

    let order = orders.order(&order_number)?;
    session.navigate(View::Tracking { order_number });

    Ok(TrackingResponse {
        tracking: order.tracking(),
        order,
        estimated_time: config.orders.estimated_delivery.clone(),
    })
}

/// Moves an order one step along the timeline (restaurant side of the demo).
pub fn advance_order_status(
    orders: &OrderState,
    order_number: String,
) -> Result<TrackingProgress, ApiError> {
    debug!(order_number = %order_number, "advance_order_status command");

    orders.with_book_mut(|b| {
        let order = b.find_mut(&order_number)?;
        let status = order.advance_status();
        info!(order_number = %order_number, status = %status, "Order status changed");
        Ok(order.tracking())
    })
}

/// The "Reorder" button: replaces the cart with the order's dishes at
/// today's prices and opens the restaurant page.
pub fn reorder(
    catalog: &CatalogState,
    orders: &OrderState,
    cart: &CartState,
    session: &SessionState,
    order_number: String,
) -> Result<CartResponse, ApiError> {
    debug!(order_number = %order_number, "reorder command");

    let order = orders.order(&order_number)?;
    let rebuilt = rebuild_cart(&order, catalog.catalog())?;

    let response = cart.with_cart_mut(|s| {
        s.replace(rebuilt.restaurant_slug.clone(), rebuilt.cart);
        CartResponse::from(&*s)
    });
    session.navigate(View::Restaurant {
        slug: rebuilt.restaurant_slug,
    });

    Ok(response)
}

/// Opens the chat with the restaurant for an order.
///
/// Replies are scheduled on the current tokio runtime; drop the thread
/// when the customer leaves the tracking page.
pub fn open_chat(
    orders: &OrderState,
    config: &StorefrontConfig,
    order_number: String,
) -> Result<ChatThread, ApiError> {
    debug!(order_number = %order_number, "open_chat command");
    ChatThread::open(orders.clone(), &order_number, config.chat.clone())
}

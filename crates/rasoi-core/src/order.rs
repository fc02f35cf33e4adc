//! # Orders
//!
//! Placed orders, their tracking timeline, message threads and order numbers.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Placed ──► Confirmed ──► Preparing ──► On the Way ──► Delivered       │
//! │   20%          40%           60%            80%           100%          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartItem};
use crate::catalog::{Catalog, MenuItem};
use crate::checkout::PlacedOrder;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its journey to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Placed,
    Confirmed,
    Preparing,
    OnTheWay,
    Delivered,
}

impl OrderStatus {
    /// The timeline in order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Placed,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
    ];

    /// 0-based position in the timeline.
    pub const fn index(&self) -> usize {
        match self {
            OrderStatus::Placed => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::OnTheWay => 3,
            OrderStatus::Delivered => 4,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Order Placed",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OnTheWay => "On the Way",
            OrderStatus::Delivered => "Delivered",
        }
    }

    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OnTheWay),
            OrderStatus::OnTheWay => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Tracking bar width: `(index + 1) / 5 * 100`.
    pub const fn progress_percent(&self) -> u8 {
        ((self.index() + 1) * 100 / Self::ALL.len()) as u8
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the tracking timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStep {
    pub status: OrderStatus,
    pub label: String,
    pub completed: bool,
    pub current: bool,
}

/// The tracking page's view of an order's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TrackingProgress {
    pub status: OrderStatus,
    pub percent: u8,
    pub steps: Vec<TrackingStep>,
}

/// Builds the timeline for `status`.
///
/// Every step up to and including the current one is completed.
pub fn tracking(status: OrderStatus) -> TrackingProgress {
    let current = status.index();
    let steps = OrderStatus::ALL
        .iter()
        .map(|s| TrackingStep {
            status: *s,
            label: s.label().to_string(),
            completed: s.index() <= current,
            current: s.index() == current,
        })
        .collect();

    TrackingProgress {
        status,
        percent: status.progress_percent(),
        steps,
    }
}

// =============================================================================
// Order
// =============================================================================

/// A dish on a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: Money,
}

impl OrderItem {
    pub fn from_menu_item(item: &MenuItem, quantity: i64) -> Self {
        OrderItem {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            quantity,
            price: item.price,
        }
    }

    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        OrderItem {
            menu_item_id: item.menu_item_id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.unit_price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    Customer,
    Restaurant,
}

/// A message in the order's chat with the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderMessage {
    pub id: String,
    pub sender: MessageSender,
    pub message: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

/// A placed order as shown on the confirmation, tracking and account pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub restaurant_name: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Rounded to pence when the order is recorded.
    pub total: Money,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub delivery_address: Option<String>,
    pub messages: Vec<OrderMessage>,
}

impl Order {
    /// Records a placed order under a fresh number.
    pub fn from_placed(
        placed: &PlacedOrder,
        id: impl Into<String>,
        order_number: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Order {
            id: id.into(),
            order_number: order_number.into(),
            restaurant_name: placed.restaurant_name.clone(),
            date,
            total: placed.summary.total.rounded(),
            status: OrderStatus::Placed,
            items: placed.items.iter().map(OrderItem::from).collect(),
            delivery_address: placed.delivery_address(),
            messages: Vec::new(),
        }
    }

    pub fn tracking(&self) -> TrackingProgress {
        tracking(self.status)
    }

    /// Moves the order one step along the timeline. Delivered orders stay put.
    pub fn advance_status(&mut self) -> OrderStatus {
        if let Some(next) = self.status.next() {
            self.status = next;
        }
        self.status
    }

    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn push_message(&mut self, message: OrderMessage) {
        self.messages.push(message);
    }
}

/// Past orders, newest first. Same-day orders sort by number, highest first.
pub fn history_newest_first(orders: &[Order]) -> Vec<&Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.order_number.cmp(&a.order_number))
    });
    sorted
}

/// A cart rebuilt from a past order, ready for its restaurant's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reorder {
    pub restaurant_slug: String,
    pub cart: Cart,
}

/// Rebuilds a cart from a past order at today's menu prices.
///
/// Fails when the restaurant or any dish no longer exists, or a dish is
/// unavailable.
pub fn reorder(order: &Order, catalog: &Catalog) -> CoreResult<Reorder> {
    let restaurant = catalog.restaurant_by_name(&order.restaurant_name)?;

    let mut cart = Cart::new();
    for item in &order.items {
        let menu_item = catalog.menu_item(&item.menu_item_id)?;
        cart.add_item(menu_item, item.quantity)?;
    }

    Ok(Reorder {
        restaurant_slug: restaurant.slug.clone(),
        cart,
    })
}

// =============================================================================
// Order Numbers
// =============================================================================

/// Hands out order numbers of the form `ORD-2024-001236`.
///
/// The six-digit sequence runs across years and continues after the highest
/// number already issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNumberSequence {
    prefix: String,
    next: u64,
}

impl OrderNumberSequence {
    pub fn new(prefix: impl Into<String>, next: u64) -> Self {
        OrderNumberSequence {
            prefix: prefix.into(),
            next,
        }
    }

    /// Continues after the highest sequence among `orders`.
    pub fn continuing_after(prefix: impl Into<String>, orders: &[Order]) -> Self {
        let highest = orders
            .iter()
            .filter_map(|o| parse_sequence(&o.order_number))
            .max()
            .unwrap_or(0);
        Self::new(prefix, highest + 1)
    }

    /// Issues the next number for an order placed in `year`.
    pub fn issue(&mut self, year: i32) -> String {
        let number = format!("{}-{}-{:06}", self.prefix, year, self.next);
        self.next += 1;
        number
    }

    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// The trailing sequence of an order number, e.g. 1234 for "ORD-2024-001234".
pub fn parse_sequence(order_number: &str) -> Option<u64> {
    order_number.rsplit('-').next()?.parse().ok()
}

/// Finds an order by its customer-facing number.
pub fn find_order<'a>(orders: &'a [Order], order_number: &str) -> CoreResult<&'a Order> {
    orders
        .iter()
        .find(|o| o.order_number == order_number)
        .ok_or_else(|| CoreError::OrderNotFound(order_number.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_progress_percent() {
        assert_eq!(OrderStatus::Placed.progress_percent(), 20);
        assert_eq!(OrderStatus::Preparing.progress_percent(), 60);
        assert_eq!(OrderStatus::Delivered.progress_percent(), 100);
    }

    #[test]
    fn test_tracking_marks_completed_steps() {
        let progress = tracking(OrderStatus::Preparing);
        let completed: Vec<bool> = progress.steps.iter().map(|s| s.completed).collect();
        assert_eq!(completed, vec![true, true, true, false, false]);
        assert!(progress.steps[2].current);
        assert_eq!(progress.steps.iter().filter(|s| s.current).count(), 1);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OnTheWay).unwrap();
        assert_eq!(json, "\"on-the-way\"");
    }

    #[test]
    fn test_advance_status_stops_at_delivered() {
        let mut order = fixtures::past_orders().remove(0);
        order.status = OrderStatus::OnTheWay;
        assert_eq!(order.advance_status(), OrderStatus::Delivered);
        assert_eq!(order.advance_status(), OrderStatus::Delivered);
    }

    #[test]
    fn test_order_numbers_continue_after_fixtures() {
        let orders = fixtures::past_orders();
        let mut sequence = OrderNumberSequence::continuing_after("ORD", &orders);
        assert_eq!(sequence.issue(2024), "ORD-2024-001236");
        assert_eq!(sequence.issue(2026), "ORD-2026-001237");
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("ORD-2024-001234"), Some(1234));
        assert_eq!(parse_sequence("garbage"), None);
    }

    #[test]
    fn test_history_newest_first() {
        let mut orders = fixtures::past_orders();
        orders.reverse();
        let history = history_newest_first(&orders);
        assert_eq!(history[0].order_number, "ORD-2024-001234");
        assert_eq!(history[1].order_number, "ORD-2024-001235");
    }

    #[test]
    fn test_reorder_rebuilds_cart() {
        let catalog = Catalog::demo();
        let order = &fixtures::past_orders()[0];

        let reorder = reorder(order, &catalog).unwrap();
        assert_eq!(reorder.restaurant_slug, "spice-garden");
        assert_eq!(reorder.cart.quantity_of("1"), 2);
        assert_eq!(reorder.cart.quantity_of("6"), 2);
    }

    #[test]
    fn test_reorder_unknown_restaurant() {
        let catalog = Catalog::demo();
        let mut order = fixtures::past_orders().remove(0);
        order.restaurant_name = "Gone Bistro".to_string();
        assert!(matches!(
            reorder(&order, &catalog),
            Err(CoreError::RestaurantNotFound(_))
        ));
    }

    #[test]
    fn test_find_order() {
        let orders = fixtures::past_orders();
        assert_eq!(find_order(&orders, "ORD-2024-001235").unwrap().restaurant_name, "Pizza Perfetto");
        assert!(matches!(
            find_order(&orders, "ORD-0000-000000"),
            Err(CoreError::OrderNotFound(_))
        ));
    }
}

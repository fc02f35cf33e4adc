//! # Order State
//!
//! Every order the customer has placed this session, seeded with their
//! history, plus the order-number sequence.

use std::sync::{Arc, Mutex};

use chrono::{Datelike, NaiveDate};
use rasoi_core::fixtures;
use rasoi_core::order::{find_order, history_newest_first, OrderMessage, OrderNumberSequence};
use rasoi_core::{CoreError, Order, PlacedOrder};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;

/// The orders and the next order number.
#[derive(Debug, Clone)]
pub struct OrderBook {
    orders: Vec<Order>,
    sequence: OrderNumberSequence,
}

impl OrderBook {
    pub fn new(prefix: &str, orders: Vec<Order>) -> Self {
        let sequence = OrderNumberSequence::continuing_after(prefix, &orders);
        OrderBook { orders, sequence }
    }

    /// Records a placed order and returns it with its new number.
    pub fn record(&mut self, placed: &PlacedOrder, today: NaiveDate) -> Order {
        let order_number = self.sequence.issue(today.year());
        let order = Order::from_placed(placed, Uuid::new_v4().to_string(), order_number, today);

        info!(
            order_number = %order.order_number,
            restaurant = %order.restaurant_name,
            total = %order.total,
            "Order placed"
        );

        self.orders.push(order.clone());
        order
    }

    pub fn find(&self, order_number: &str) -> Result<&Order, CoreError> {
        find_order(&self.orders, order_number)
    }

    pub fn find_mut(&mut self, order_number: &str) -> Result<&mut Order, CoreError> {
        self.orders
            .iter_mut()
            .find(|o| o.order_number == order_number)
            .ok_or_else(|| CoreError::OrderNotFound(order_number.to_string()))
    }

    /// Orders newest first, for the account page.
    pub fn history(&self) -> Vec<Order> {
        history_newest_first(&self.orders).into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Shared order state.
#[derive(Debug, Clone)]
pub struct OrderState {
    book: Arc<Mutex<OrderBook>>,
}

impl OrderState {
    pub fn new(book: OrderBook) -> Self {
        OrderState {
            book: Arc::new(Mutex::new(book)),
        }
    }

    /// Seeded with the demo customer's past orders.
    pub fn demo(prefix: &str) -> Self {
        Self::new(OrderBook::new(prefix, fixtures::past_orders()))
    }

    pub fn with_book<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderBook) -> R,
    {
        let book = self.book.lock().expect("Order mutex poisoned");
        f(&book)
    }

    pub fn with_book_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderBook) -> R,
    {
        let mut book = self.book.lock().expect("Order mutex poisoned");
        f(&mut book)
    }

    /// Copy of one order.
    pub fn order(&self, order_number: &str) -> Result<Order, ApiError> {
        Ok(self.with_book(|b| b.find(order_number).cloned())?)
    }

    /// Appends a message to an order's thread.
    pub fn push_message(&self, order_number: &str, message: OrderMessage) -> Result<(), ApiError> {
        self.with_book_mut(|b| {
            b.find_mut(order_number)?.push_message(message);
            Ok::<(), CoreError>(())
        })?;
        Ok(())
    }

    pub fn messages(&self, order_number: &str) -> Result<Vec<OrderMessage>, ApiError> {
        Ok(self.order(order_number)?.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rasoi_core::order::MessageSender;

    #[test]
    fn test_demo_history_newest_first() {
        let state = OrderState::demo("ORD");
        let history = state.with_book(|b| b.history());
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].order_number, "ORD-2024-001234");
    }

    #[test]
    fn test_unknown_order() {
        let state = OrderState::demo("ORD");
        let err = state.order("ORD-2024-999999").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[test]
    fn test_push_message() {
        let state = OrderState::demo("ORD");
        state
            .push_message(
                "ORD-2024-001235",
                OrderMessage {
                    id: "m1".to_string(),
                    sender: MessageSender::Customer,
                    message: "Ring the bell".to_string(),
                    timestamp: Utc::now(),
                },
            )
            .unwrap();

        let messages = state.messages("ORD-2024-001235").unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "Ring the bell");
    }
}

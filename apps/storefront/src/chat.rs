//! # Order Chat
//!
//! The message thread on the tracking page. Each customer message schedules
//! one automatic restaurant reply after a delay.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  send("Ring the bell")                                                  │
//! │      │                                                                  │
//! │      ├── customer message appended to the order                         │
//! │      │                                                                  │
//! │      └── pending reply ── abort previous ──► spawn(sleep → reply)       │
//! │                                                                         │
//! │  close() / drop  ──► pending reply aborted                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! At most one reply is pending per thread. Sending again before it fires
//! replaces it, so a burst of messages gets a single answer.

use chrono::Utc;
use rasoi_core::order::{MessageSender, OrderMessage};
use rasoi_core::validation::validate_message;
use rasoi_core::CoreError;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{ChatSettings, OrderState};

fn new_message(sender: MessageSender, text: impl Into<String>) -> OrderMessage {
    OrderMessage {
        id: Uuid::new_v4().to_string(),
        sender,
        message: text.into(),
        timestamp: Utc::now(),
    }
}

/// An open chat for one order.
#[derive(Debug)]
pub struct ChatThread {
    order_number: String,
    orders: OrderState,
    settings: ChatSettings,
    pending: Option<JoinHandle<()>>,
}

impl ChatThread {
    /// Opens the chat for an existing order.
    pub fn open(
        orders: OrderState,
        order_number: &str,
        settings: ChatSettings,
    ) -> Result<Self, ApiError> {
        orders.order(order_number)?;
        debug!(order_number, "Chat opened");

        Ok(ChatThread {
            order_number: order_number.to_string(),
            orders,
            settings,
            pending: None,
        })
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Appends a customer message and schedules the restaurant's reply.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send(&mut self, text: &str) -> Result<OrderMessage, ApiError> {
        let text = validate_message(text).map_err(CoreError::from)?;
        let runtime = Handle::try_current()
            .map_err(|e| ApiError::internal(format!("Chat needs a tokio runtime: {}", e)))?;

        let message = new_message(MessageSender::Customer, text);
        self.orders.push_message(&self.order_number, message.clone())?;
        debug!(order_number = %self.order_number, "Customer message sent");

        self.schedule_reply(&runtime);
        Ok(message)
    }

    fn schedule_reply(&mut self, runtime: &Handle) {
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let orders = self.orders.clone();
        let order_number = self.order_number.clone();
        let delay = self.settings.auto_reply_delay();
        let text = self.settings.auto_reply_text.clone();

        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let reply = new_message(MessageSender::Restaurant, text);
            match orders.push_message(&order_number, reply) {
                Ok(()) => debug!(%order_number, "Restaurant auto-reply sent"),
                Err(e) => warn!(%order_number, error = %e, "Auto-reply dropped"),
            }
        }));
    }

    /// True while a reply is waiting to be sent.
    pub fn has_pending_reply(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn messages(&self) -> Result<Vec<OrderMessage>, ApiError> {
        self.orders.messages(&self.order_number)
    }

    /// Closes the chat, cancelling any reply not yet sent.
    pub fn close(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
            debug!(order_number = %self.order_number, "Pending auto-reply cancelled");
        }
    }
}

impl Drop for ChatThread {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const ORDER: &str = "ORD-2024-001235";

    fn settings() -> ChatSettings {
        ChatSettings {
            auto_reply_delay_ms: 3000,
            auto_reply_text: "On it!".to_string(),
        }
    }

    fn senders(chat: &ChatThread) -> Vec<MessageSender> {
        chat.messages().unwrap().iter().map(|m| m.sender).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let orders = OrderState::demo("ORD");
        let mut chat = ChatThread::open(orders.clone(), ORDER, settings()).unwrap();

        chat.send("  Please ring the bell  ").unwrap();
        assert!(chat.has_pending_reply());
        assert_eq!(senders(&chat), vec![MessageSender::Customer]);
        assert_eq!(chat.messages().unwrap()[0].message, "Please ring the bell");

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(senders(&chat), vec![MessageSender::Customer]);

        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(
            senders(&chat),
            vec![MessageSender::Customer, MessageSender::Restaurant]
        );
        assert_eq!(orders.messages(ORDER).unwrap()[1].message, "On it!");
        assert!(!chat.has_pending_reply());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_message_replaces_pending_reply() {
        let orders = OrderState::demo("ORD");
        let mut chat = ChatThread::open(orders, ORDER, settings()).unwrap();

        chat.send("Hello").unwrap();
        tokio::time::sleep(Duration::from_millis(2000)).await;
        chat.send("Are you there?").unwrap();

        // The first reply would have fired at 3s
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(
            senders(&chat),
            vec![MessageSender::Customer, MessageSender::Customer]
        );

        tokio::time::sleep(Duration::from_millis(2000)).await;
        tokio::task::yield_now().await;
        assert_eq!(
            senders(&chat),
            vec![
                MessageSender::Customer,
                MessageSender::Customer,
                MessageSender::Restaurant
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_reply() {
        let orders = OrderState::demo("ORD");
        let mut chat = ChatThread::open(orders.clone(), ORDER, settings()).unwrap();

        chat.send("Hello").unwrap();
        chat.close();
        assert!(!chat.has_pending_reply());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(orders.messages(ORDER).unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_reply() {
        let orders = OrderState::demo("ORD");
        {
            let mut chat = ChatThread::open(orders.clone(), ORDER, settings()).unwrap();
            chat.send("Hello").unwrap();
        }

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(orders.messages(ORDER).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_blank_message() {
        let orders = OrderState::demo("ORD");
        let mut chat = ChatThread::open(orders, ORDER, settings()).unwrap();

        let err = chat.send("   ").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert!(!chat.has_pending_reply());
    }

    #[test]
    fn test_open_unknown_order() {
        let err = ChatThread::open(OrderState::demo("ORD"), "ORD-2024-000001", settings())
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }
}

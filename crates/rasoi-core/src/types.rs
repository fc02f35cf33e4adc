//! # Domain Types
//!
//! Pricing-side types shared by the calculator, the cart and checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    CartLine     │   │ PromotionCode   │   │ PricedOrderSummary  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  code           │   │  subtotal           │   │
//! │  │  unit_price     │   │  kind           │   │  discount           │   │
//! │  │  quantity       │   │  value          │   │  delivery_fee       │   │
//! │  └─────────────────┘   │  min subtotal   │   │  service_fee        │   │
//! │                        │  valid_until    │   │  total              │   │
//! │  ┌─────────────────┐   └─────────────────┘   │  promotion outcome  │   │
//! │  │ FulfillmentMode │                         └─────────────────────┘   │
//! │  │  Delivery       │   ┌─────────────────┐                             │
//! │  │  Collection     │   │ PaymentMethod   │                             │
//! │  └─────────────────┘   │ Card/Cash/Wallet│                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::promotion::PromotionRejection;

// =============================================================================
// Fulfillment Mode
// =============================================================================

/// Whether the order is delivered or collected in person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentMode {
    /// Courier brings the order; delivery fee applies.
    #[default]
    Delivery,
    /// Customer picks the order up; no delivery fee.
    Collection,
}

impl FulfillmentMode {
    /// True when a delivery address must be collected.
    #[inline]
    pub const fn needs_address(&self) -> bool {
        matches!(self, FulfillmentMode::Delivery)
    }
}

impl fmt::Display for FulfillmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentMode::Delivery => f.write_str("delivery"),
            FulfillmentMode::Collection => f.write_str("collection"),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct orderable item and its quantity, as seen by the calculator.
///
/// The calculator trusts these values: `unit_price >= 0`, `quantity >= 1`
/// and `id` unique within the cart are enforced by the cart store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl CartLine {
    pub fn new(id: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        CartLine {
            id: id.into(),
            unit_price,
            quantity,
        }
    }

    /// Unit price × quantity, unrounded.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Promotion Code
// =============================================================================

/// What a promotion does once it qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    /// Percentage of the subtotal, typically gated by a minimum order.
    PercentOff,
    /// Waives the delivery fee; subtotal untouched.
    FreeDelivery,
    /// Store-wide percentage, typically gated by an end date.
    FlatPercentOff,
}

/// Reference data for one promotion code. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PromotionCode {
    /// Match key (compared case-insensitively).
    pub code: String,

    /// Customer-facing description, e.g. "Get 20% off on your first order".
    pub description: String,

    pub kind: PromotionKind,

    /// Fraction of the subtotal for percentage kinds (0.20 = 20%).
    /// Ignored for `FreeDelivery`.
    #[ts(type = "string")]
    pub value: Decimal,

    /// Subtotal the cart must reach for the code to apply.
    pub min_order_subtotal: Option<Money>,

    /// Last day (inclusive) the code can be used.
    #[ts(as = "Option<String>")]
    pub valid_until: Option<NaiveDate>,
}

impl PromotionCode {
    /// Short badge text, e.g. "20% off" or "Free Delivery".
    pub fn headline(&self) -> String {
        match self.kind {
            PromotionKind::FreeDelivery => "Free Delivery".to_string(),
            PromotionKind::PercentOff | PromotionKind::FlatPercentOff => {
                format!("{}% off", (self.value * Decimal::ONE_HUNDRED).normalize())
            }
        }
    }
}

// =============================================================================
// Priced Order Summary
// =============================================================================

/// What happened to the promotion code supplied with a pricing request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromotionOutcome {
    /// No code was supplied.
    #[default]
    NotRequested,
    /// The code qualified and its effect is included in the summary.
    Applied { code: String },
    /// The code was supplied but did not qualify; no effect on the summary.
    Rejected {
        code: String,
        reason: PromotionRejection,
    },
}

impl PromotionOutcome {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, PromotionOutcome::Applied { .. })
    }
}

/// Result of pricing an order. Recomputed from scratch on every call.
///
/// ## Invariants
/// - `total == max(0, subtotal + delivery_fee + service_fee - discount)`
/// - `discount <= subtotal`
/// - every amount is non-negative and unrounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedOrderSummary {
    pub subtotal: Money,
    pub discount: Money,
    pub delivery_fee: Money,
    pub service_fee: Money,
    pub total: Money,
    pub promotion: PromotionOutcome,
}

impl PricedOrderSummary {
    /// Copy with every amount rounded to pence, for display.
    pub fn rounded(&self) -> PricedOrderSummary {
        PricedOrderSummary {
            subtotal: self.subtotal.rounded(),
            discount: self.discount.rounded(),
            delivery_fee: self.delivery_fee.rounded(),
            service_fee: self.service_fee.rounded(),
            total: self.total.rounded(),
            promotion: self.promotion.clone(),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer intends to pay. Informational only; no payment is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment.
    #[default]
    Card,
    /// Cash on delivery.
    Cash,
    /// Apple Pay / Google Pay.
    Wallet,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fulfillment_default_is_delivery() {
        assert_eq!(FulfillmentMode::default(), FulfillmentMode::Delivery);
        assert!(FulfillmentMode::Delivery.needs_address());
        assert!(!FulfillmentMode::Collection.needs_address());
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new("1", Money::from_minor(1499), 2);
        assert_eq!(line.line_total().amount(), dec!(29.98));
    }

    #[test]
    fn test_promotion_headline() {
        let code = PromotionCode {
            code: "WELCOME20".to_string(),
            description: String::new(),
            kind: PromotionKind::PercentOff,
            value: dec!(0.20),
            min_order_subtotal: None,
            valid_until: None,
        };
        assert_eq!(code.headline(), "20% off");

        let free = PromotionCode {
            kind: PromotionKind::FreeDelivery,
            value: Decimal::ZERO,
            ..code
        };
        assert_eq!(free.headline(), "Free Delivery");
    }

    #[test]
    fn test_promotion_outcome_serialization() {
        let outcome = PromotionOutcome::Applied {
            code: "SAVE10".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "applied");
        assert_eq!(json["code"], "SAVE10");
    }
}

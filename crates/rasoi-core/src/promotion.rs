//! # Promotions
//!
//! Resolves promotion codes typed by the customer and decides whether a
//! resolved code qualifies for a given order.
//!
//! ## Two Separate Questions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Does the code exist?          PromotionRegistry::lookup            │
//! │     " welcome20 " ──► WELCOME20   (trimmed, case-insensitive)          │
//! │     "BOGUS"       ──► CoreError::PromotionNotFound                     │
//! │                                                                         │
//! │  2. Does it qualify right now?    evaluate(code, subtotal, today)       │
//! │     ├── past valid_until?     ──► Rejected(Expired)                     │
//! │     ├── subtotal < minimum?   ──► Rejected(BelowMinimum)                │
//! │     └── otherwise             ──► Discount(subtotal × value)            │
//! │                                   or WaiveDelivery                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected code never fails pricing: the order is priced without it and
//! the rejection reason is reported next to the totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::fixtures;
use crate::money::Money;
use crate::types::{PromotionCode, PromotionKind};

/// Why a known code did not apply to this order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionRejection {
    /// The code's last valid day has passed.
    #[error("This code expired on {valid_until}")]
    Expired {
        #[ts(as = "String")]
        valid_until: NaiveDate,
    },

    /// The order subtotal has not reached the code's minimum.
    #[error("Spend {minimum} or more to use this code (currently {subtotal})")]
    BelowMinimum { minimum: Money, subtotal: Money },
}

/// The effect of a qualifying promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionEffect {
    /// Amount taken off the subtotal (unrounded).
    Discount(Money),
    /// Delivery fee becomes zero.
    WaiveDelivery,
}

/// Decides whether `code` qualifies for an order with this `subtotal` on
/// `today`.
///
/// `valid_until` is inclusive: a code valid until 2025-11-15 still works on
/// the 15th.
pub fn evaluate(
    code: &PromotionCode,
    subtotal: Money,
    today: NaiveDate,
) -> Result<PromotionEffect, PromotionRejection> {
    if let Some(valid_until) = code.valid_until {
        if today > valid_until {
            return Err(PromotionRejection::Expired { valid_until });
        }
    }

    if let Some(minimum) = code.min_order_subtotal {
        if subtotal < minimum {
            return Err(PromotionRejection::BelowMinimum { minimum, subtotal });
        }
    }

    Ok(match code.kind {
        PromotionKind::PercentOff | PromotionKind::FlatPercentOff => {
            PromotionEffect::Discount(subtotal.fraction(code.value))
        }
        PromotionKind::FreeDelivery => PromotionEffect::WaiveDelivery,
    })
}

// =============================================================================
// Registry
// =============================================================================

/// The reference table of promotion codes.
#[derive(Debug, Clone, Default)]
pub struct PromotionRegistry {
    codes: Vec<PromotionCode>,
}

impl PromotionRegistry {
    pub fn new(codes: Vec<PromotionCode>) -> Self {
        PromotionRegistry { codes }
    }

    /// Registry loaded with the demo storefront's codes.
    pub fn demo() -> Self {
        Self::new(fixtures::promotion_codes())
    }

    /// Finds a code by what the customer typed.
    ///
    /// Surrounding whitespace is ignored and the match is case-insensitive.
    pub fn lookup(&self, input: &str) -> CoreResult<&PromotionCode> {
        let key = input.trim();
        if key.is_empty() {
            return Err(CoreError::PromotionNotFound(String::new()));
        }

        self.codes
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(key))
            .ok_or_else(|| CoreError::PromotionNotFound(key.to_uppercase()))
    }

    /// Offers to advertise at checkout ("3 offers available").
    ///
    /// Codes past their end date are hidden.
    pub fn offers(&self, today: NaiveDate) -> Vec<&PromotionCode> {
        self.codes
            .iter()
            .filter(|c| c.valid_until.map_or(true, |d| today <= d))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

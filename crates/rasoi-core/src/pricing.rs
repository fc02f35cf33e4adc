//! # Order Pricing
//!
//! Turns cart lines, a fulfillment mode and an optional promotion code into a
//! [`PricedOrderSummary`].
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. subtotal     = Σ unit_price × quantity        (exact)              │
//! │  2. delivery_fee = 2.99 if Delivery, else 0                            │
//! │     service_fee  = 1.49 always                                         │
//! │  3. code qualifies?                                                    │
//! │       PercentOff / FlatPercentOff ──► discount = subtotal × value      │
//! │       FreeDelivery                ──► delivery_fee = 0                 │
//! │     code does not qualify         ──► discount = 0 (reason recorded)   │
//! │  4. total = max(0, subtotal + delivery_fee + service_fee − discount)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No step rounds. Rounding to pence happens when the summary is displayed.
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use rasoi_core::pricing::price;
//! use rasoi_core::{CartLine, FulfillmentMode, Money};
//!
//! let lines = vec![
//!     CartLine::new("1", Money::from_minor(1499), 2),
//!     CartLine::new("6", Money::from_minor(349), 1),
//! ];
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let summary = price(&lines, FulfillmentMode::Delivery, None, today);
//!
//! assert_eq!(summary.subtotal, Money::from_minor(3347));
//! assert_eq!(summary.total, Money::from_minor(3795));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::promotion::{evaluate, PromotionEffect};
use crate::types::{CartLine, FulfillmentMode, PricedOrderSummary, PromotionCode, PromotionOutcome};

/// Delivery fee charged when the order is delivered (£2.99).
pub const DELIVERY_FEE: Money = Money::from_decimal(Decimal::from_parts(299, 0, 0, false, 2));

/// Flat service fee charged on every order (£1.49).
pub const SERVICE_FEE: Money = Money::from_decimal(Decimal::from_parts(149, 0, 0, false, 2));

/// Fees added on top of the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    pub delivery_fee: Money,
    pub service_fee: Money,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            delivery_fee: DELIVERY_FEE,
            service_fee: SERVICE_FEE,
        }
    }
}

/// Prices an order with the standard fees.
///
/// `today` is the date promotion expiry is checked against. The function
/// reads no clock and keeps no state, so the same inputs always give the
/// same summary.
pub fn price(
    lines: &[CartLine],
    mode: FulfillmentMode,
    code: Option<&PromotionCode>,
    today: NaiveDate,
) -> PricedOrderSummary {
    price_with_fees(lines, mode, code, today, &FeeSchedule::default())
}

/// Prices an order with an explicit fee schedule.
pub fn price_with_fees(
    lines: &[CartLine],
    mode: FulfillmentMode,
    code: Option<&PromotionCode>,
    today: NaiveDate,
    fees: &FeeSchedule,
) -> PricedOrderSummary {
    let subtotal: Money = lines.iter().map(CartLine::line_total).sum();

    let mut delivery_fee = match mode {
        FulfillmentMode::Delivery => fees.delivery_fee,
        FulfillmentMode::Collection => Money::zero(),
    };
    let service_fee = fees.service_fee;
    let mut discount = Money::zero();

    let promotion = match code {
        None => PromotionOutcome::NotRequested,
        Some(code) => match evaluate(code, subtotal, today) {
            Ok(PromotionEffect::Discount(amount)) => {
                discount = amount.floor_at_zero().min(subtotal);
                PromotionOutcome::Applied {
                    code: code.code.clone(),
                }
            }
            Ok(PromotionEffect::WaiveDelivery) => {
                delivery_fee = Money::zero();
                PromotionOutcome::Applied {
                    code: code.code.clone(),
                }
            }
            Err(reason) => PromotionOutcome::Rejected {
                code: code.code.clone(),
                reason,
            },
        },
    };

    let total = (subtotal + delivery_fee + service_fee - discount).floor_at_zero();

    PricedOrderSummary {
        subtotal,
        discount,
        delivery_fee,
        service_fee,
        total,
        promotion,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::PromotionRejection;
    use crate::types::PromotionKind;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn sample_lines() -> Vec<CartLine> {
        vec![
            CartLine::new("butter-chicken", Money::from_minor(1499), 2),
            CartLine::new("garlic-naan", Money::from_minor(349), 1),
        ]
    }

    fn code(kind: PromotionKind, value: Decimal, min: Option<Money>) -> PromotionCode {
        PromotionCode {
            code: "CODE".to_string(),
            description: String::new(),
            kind,
            value,
            min_order_subtotal: min,
            valid_until: None,
        }
    }

    #[test]
    fn test_fee_constants() {
        assert_eq!(DELIVERY_FEE.amount(), dec!(2.99));
        assert_eq!(SERVICE_FEE.amount(), dec!(1.49));
    }

    #[test]
    fn test_delivery_without_code() {
        let summary = price(&sample_lines(), FulfillmentMode::Delivery, None, today());

        assert_eq!(summary.subtotal.amount(), dec!(33.47));
        assert_eq!(summary.delivery_fee.amount(), dec!(2.99));
        assert_eq!(summary.service_fee.amount(), dec!(1.49));
        assert!(summary.discount.is_zero());
        assert_eq!(summary.total.amount(), dec!(37.95));
        assert_eq!(summary.promotion, PromotionOutcome::NotRequested);
    }

    #[test]
    fn test_ten_percent_keeps_full_precision() {
        let save10 = code(PromotionKind::PercentOff, dec!(0.10), None);
        let summary = price(&sample_lines(), FulfillmentMode::Delivery, Some(&save10), today());

        assert_eq!(summary.discount.amount(), dec!(3.347));
        assert_eq!(summary.total.amount(), dec!(34.603));
        assert_eq!(summary.total.rounded().amount(), dec!(34.60));
        assert!(summary.promotion.is_applied());
    }

    #[test]
    fn test_subtotal_independent_of_line_order() {
        let mut reversed = sample_lines();
        reversed.reverse();

        let a = price(&sample_lines(), FulfillmentMode::Collection, None, today());
        let b = price(&reversed, FulfillmentMode::Collection, None, today());
        assert_eq!(a, b);
    }

    #[test]
    fn test_collection_has_no_delivery_fee() {
        let summary = price(&sample_lines(), FulfillmentMode::Collection, None, today());
        assert!(summary.delivery_fee.is_zero());
        assert_eq!(summary.total.amount(), dec!(34.96));
    }

    #[test]
    fn test_free_delivery_waives_fee_not_subtotal() {
        let freeship = code(PromotionKind::FreeDelivery, Decimal::ZERO, Some(Money::from_minor(2500)));
        let summary = price(&sample_lines(), FulfillmentMode::Delivery, Some(&freeship), today());

        assert!(summary.delivery_fee.is_zero());
        assert!(summary.discount.is_zero());
        assert_eq!(summary.total.amount(), dec!(34.96));
    }

    #[test]
    fn test_percent_off_below_minimum_gives_no_discount() {
        let welcome = code(PromotionKind::PercentOff, dec!(0.20), Some(Money::from_minor(5000)));
        let summary = price(&sample_lines(), FulfillmentMode::Delivery, Some(&welcome), today());

        assert!(summary.discount.is_zero());
        assert_eq!(summary.total.amount(), dec!(37.95));
        assert!(matches!(
            summary.promotion,
            PromotionOutcome::Rejected {
                reason: PromotionRejection::BelowMinimum { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_expired_code_gives_no_discount() {
        let weekend = PromotionCode {
            valid_until: NaiveDate::from_ymd_opt(2025, 11, 15),
            ..code(PromotionKind::FlatPercentOff, dec!(0.15), None)
        };
        let summary = price(&sample_lines(), FulfillmentMode::Delivery, Some(&weekend), today());

        assert!(summary.discount.is_zero());
        assert!(!summary.promotion.is_applied());
    }

    #[test]
    fn test_discount_never_exceeds_subtotal_and_total_never_negative() {
        let absurd = code(PromotionKind::FlatPercentOff, dec!(5.0), None);
        let summary = price(&sample_lines(), FulfillmentMode::Collection, Some(&absurd), today());

        assert_eq!(summary.discount, summary.subtotal);
        assert!(!summary.total.is_negative());
        assert_eq!(summary.total, SERVICE_FEE);
    }

    #[test]
    fn test_invariant_total_equation() {
        let save10 = code(PromotionKind::PercentOff, dec!(0.10), None);
        for mode in [FulfillmentMode::Delivery, FulfillmentMode::Collection] {
            let s = price(&sample_lines(), mode, Some(&save10), today());
            assert_eq!(s.total, s.subtotal + s.delivery_fee + s.service_fee - s.discount);
            assert!(s.discount <= s.subtotal);
        }
    }

    #[test]
    fn test_custom_fee_schedule() {
        let fees = FeeSchedule {
            delivery_fee: Money::from_minor(499),
            service_fee: Money::zero(),
        };
        let summary = price_with_fees(&sample_lines(), FulfillmentMode::Delivery, None, today(), &fees);
        assert_eq!(summary.total.amount(), dec!(38.46));
    }
}

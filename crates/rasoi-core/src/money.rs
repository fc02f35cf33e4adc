//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    14.99 * 2 + 3.49 = 33.470000000000006  ❌ WRONG!                     │
//! │                                                                         │
//! │  Rounding every step to pence compounds the error:                      │
//! │    10% of £33.47 = £3.347 → £3.35 → total drifts by a penny            │
//! │                                                                         │
//! │  OUR SOLUTION: Exact decimals, rounded only for display                 │
//! │    33.47 × 0.10 = 3.347 (exact)                                        │
//! │    total 34.603 (exact) → displayed as £34.60                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rasoi_core::money::Money;
//!
//! let price = Money::from_minor(1499); // £14.99
//! let line = price * 2;                 // £29.98
//! assert_eq!(line.to_string(), "£29.98");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Decimal places used when a value is shown to a customer.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in pounds, carried at full decimal precision.
///
/// ## Design Decisions
/// - **Decimal, not cents**: percentage discounts produce sub-penny values
///   (3.347) that must survive until the final total is shown
/// - **Signed**: intermediate results may go negative before the total is
///   floored at zero
/// - **Serialized as a string**: "34.603" reaches the UI without float loss
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► CartItem.unit_price ──► CartLine.unit_price
///                                                   │
///                                                   ▼
///                                   price() ──► PricedOrderSummary
///                                                   │
///                                                   ▼
///                                  rounded() ──► "£34.60" in the UI
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount in pounds.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from minor units (pence).
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::money::Money;
    ///
    /// let fee = Money::from_minor(299);
    /// assert_eq!(fee.to_string(), "£2.99");
    /// ```
    #[inline]
    pub fn from_minor(pence: i64) -> Self {
        Money(Decimal::new(pence, 2))
    }

    /// Returns the exact amount in pounds.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to pence for presentation (half away from zero).
    ///
    /// Never call this between pricing steps; the calculator keeps full
    /// precision and only the UI rounds.
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let total = Money::from_decimal(Decimal::new(34603, 3)); // 34.603
    /// assert_eq!(total.rounded(), Money::from_minor(3460));
    /// ```
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Butter Chicken £14.99
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: £29.98
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Returns `rate` (a fraction, 0.10 = 10%) of this amount, unrounded.
    ///
    /// ```rust
    /// use rasoi_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_minor(3347);
    /// let ten_percent = subtotal.fraction(Decimal::new(10, 2));
    /// assert_eq!(ten_percent.amount(), Decimal::new(3347, 3)); // 3.347
    /// ```
    #[inline]
    pub fn fraction(&self, rate: Decimal) -> Money {
        Money(self.0 * rate)
    }

    /// Clamps negative amounts to zero.
    #[inline]
    pub fn floor_at_zero(self) -> Money {
        self.max(Money::zero())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the value rounded to pence with a pound sign.
///
/// Use `StorefrontConfig::format_currency` when the currency symbol is
/// configurable.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}£{:.2}", sign, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1499);
        assert_eq!(money.amount(), dec!(14.99));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1499).to_string(), "£14.99");
        assert_eq!(Money::from_minor(500).to_string(), "£5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-£5.50");
        assert_eq!(Money::zero().to_string(), "£0.00");
        assert_eq!(Money::from_decimal(dec!(34.603)).to_string(), "£34.60");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).amount(), dec!(15.00));
        assert_eq!((a - b).amount(), dec!(5.00));
        assert_eq!((a * 3).amount(), dec!(30.00));
    }

    #[test]
    fn test_no_float_drift() {
        // 14.99 × 2 + 3.49 is exactly 33.47
        let total = Money::from_minor(1499) * 2 + Money::from_minor(349);
        assert_eq!(total.amount(), dec!(33.47));
    }

    #[test]
    fn test_fraction_keeps_full_precision() {
        let discount = Money::from_decimal(dec!(33.47)).fraction(dec!(0.1));
        assert_eq!(discount.amount(), dec!(3.347));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(0.005)).rounded().amount(), dec!(0.01));
        assert_eq!(Money::from_decimal(dec!(0.004)).rounded().amount(), dec!(0.00));
        assert_eq!(Money::from_decimal(dec!(-0.005)).rounded().amount(), dec!(-0.01));
    }

    #[test]
    fn test_floor_at_zero() {
        assert_eq!(Money::from_minor(-1).floor_at_zero(), Money::zero());
        assert_eq!(Money::from_minor(1).floor_at_zero(), Money::from_minor(1));
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_minor(100), Money::from_minor(250)];
        let total: Money = lines.iter().sum();
        assert_eq!(total, Money::from_minor(350));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_decimal(dec!(34.603))).unwrap();
        assert_eq!(json, "\"34.603\"");
    }
}

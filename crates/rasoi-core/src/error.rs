//! # Error Types
//!
//! Domain-specific error types for rasoi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rasoi-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog, cart and checkout rule violations     │
//! │  └── ValidationError  - Customer input failures (checkout form)        │
//! │                                                                         │
//! │  Not errors: PromotionRejection (promotion.rs) travels inside the      │
//! │  priced summary, because a code that does not qualify still prices.  │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::checkout::CheckoutStep;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are translated to
/// user-facing messages by the storefront.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No restaurant with this slug or id.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// No menu item with this id.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Menu item is marked unavailable and cannot be added to a cart.
    #[error("{name} is currently unavailable")]
    MenuItemUnavailable { name: String },

    /// Restaurant is closed and is not taking orders.
    #[error("{name} is currently offline")]
    RestaurantClosed { name: String },

    /// Order number does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Promotion code is not in the reference table.
    ///
    /// ## User Workflow
    /// ```text
    /// Promo code box: "save1O"   (letter O, not zero)
    ///      │
    ///      ▼
    /// PromotionRegistry::lookup
    ///      │
    ///      ▼
    /// PromotionNotFound("SAVE1O")
    ///      │
    ///      ▼
    /// UI shows: "Promo code SAVE1O is not valid"
    /// ```
    #[error("Promo code {0} is not valid")]
    PromotionNotFound(String),

    /// The cart line does not exist.
    #[error("Item {0} is not in the cart")]
    LineNotInCart(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout needs at least one line.
    #[error("Cart is empty")]
    EmptyCart,

    /// An operation was attempted on the wrong checkout step.
    #[error("Cannot {action} during the {current} step")]
    InvalidCheckoutStep {
        action: &'static str,
        current: CheckoutStep,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when customer input doesn't meet requirements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., email without @, letters in a phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 120,
            max: 99,
        };
        assert_eq!(err.to_string(), "Quantity 120 exceeds maximum allowed (99)");

        let err = CoreError::InvalidCheckoutStep {
            action: "place an order",
            current: CheckoutStep::Details,
        };
        assert_eq!(
            err.to_string(),
            "Cannot place an order during the details step"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "postcode".to_string(),
        };
        assert_eq!(err.to_string(), "postcode is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

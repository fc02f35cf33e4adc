//! # Validation Module
//!
//! Input validation for customer-entered values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form                                                     │
//! │  └── Immediate feedback (empty field highlighting)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  └── THIS MODULE: checkout details, quantities, messages               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing                                                      │
//! │  └── Trusts its input; never validates                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rasoi_core::validation::{validate_email, validate_quantity};
//!
//! assert!(validate_email("john@example.com").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 200;
const MAX_INSTRUCTIONS_LEN: usize = 300;
const MAX_MESSAGE_LEN: usize = 500;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn required<'a>(field: &str, value: &'a str, max: usize) -> ValidationResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value)
}

/// Validates the customer's full name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    required("name", name, MAX_NAME_LEN).map(|_| ())
}

/// Validates a phone number.
///
/// ## Rules
/// - Digits, spaces, hyphens, parentheses and a leading `+` only
/// - Between 7 and 15 digits, e.g. "+44 7700 900000"
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = required("phone", phone, 25)?;

    let allowed = phone
        .char_indices()
        .all(|(i, c)| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')') || (c == '+' && i == 0));
    if !allowed {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces and a leading +".to_string(),
        });
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must have between 7 and 15 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// Only the shape is checked: one `@`, a non-empty local part and a domain
/// containing a dot.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = required("email", email, 254)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.contains(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a street address (delivery orders only).
pub fn validate_address(address: &str) -> ValidationResult<()> {
    required("address", address, MAX_ADDRESS_LEN).map(|_| ())
}

/// Validates a UK-style postcode, e.g. "SW1A 1AA".
///
/// ## Rules
/// - 5 to 7 letters/digits once spaces are removed
/// - Starts with a letter, ends with digit + two letters
pub fn validate_postcode(postcode: &str) -> ValidationResult<()> {
    let postcode = required("postcode", postcode, 10)?;
    let compact: Vec<char> = postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let shape_ok = (5..=7).contains(&compact.len())
        && compact.iter().all(char::is_ascii_alphanumeric)
        && compact[0].is_ascii_alphabetic()
        && compact[compact.len() - 3].is_ascii_digit()
        && compact[compact.len() - 2].is_ascii_alphabetic()
        && compact[compact.len() - 1].is_ascii_alphabetic();

    if !shape_ok {
        return Err(ValidationError::InvalidFormat {
            field: "postcode".to_string(),
            reason: "must be a valid postcode such as SW1A 1AA".to_string(),
        });
    }

    Ok(())
}

/// Validates optional delivery instructions.
pub fn validate_instructions(instructions: &str) -> ValidationResult<()> {
    if instructions.trim().chars().count() > MAX_INSTRUCTIONS_LEN {
        return Err(ValidationError::TooLong {
            field: "instructions".to_string(),
            max: MAX_INSTRUCTIONS_LEN,
        });
    }
    Ok(())
}

/// Validates a chat message to the restaurant and returns it trimmed.
pub fn validate_message(message: &str) -> ValidationResult<String> {
    required("message", message, MAX_MESSAGE_LEN).map(str::to_string)
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (no results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (99)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

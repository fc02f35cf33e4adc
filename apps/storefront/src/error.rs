//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Web UI                      Rust Storefront                            │
//! │  ──────                      ───────────────                            │
//! │                                                                         │
//! │  apply_promo_code("bogus")                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown code? ──── CoreError::PromotionNotFound ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad form input? ── CoreError::Validation ────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "PROMOTION_ERROR",                                           │
//! │    "message": "Promo code BOGUS is not valid" }                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use rasoi_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// API error returned from storefront commands.
///
/// ## Serialization
/// This is what the web UI receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Restaurant not found: spice-gardens"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Restaurant, dish or order does not exist
    NotFound,

    /// Customer input failed validation
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Checkout step rules were broken
    CheckoutError,

    /// Promotion code not recognised
    PromotionError,

    /// Restaurant is not taking orders
    RestaurantClosed,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a checkout error.
    pub fn checkout(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CheckoutError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::RestaurantNotFound(_)
            | CoreError::MenuItemNotFound(_)
            | CoreError::OrderNotFound(_) => ErrorCode::NotFound,
            CoreError::RestaurantClosed { .. } => ErrorCode::RestaurantClosed,
            CoreError::PromotionNotFound(_) => ErrorCode::PromotionError,
            CoreError::MenuItemUnavailable { .. }
            | CoreError::LineNotInCart(_)
            | CoreError::CartTooLarge { .. } => ErrorCode::CartError,
            CoreError::EmptyCart | CoreError::InvalidCheckoutStep { .. } => {
                ErrorCode::CheckoutError
            }
            CoreError::QuantityTooLarge { .. } => ErrorCode::ValidationError,
            CoreError::Validation(e) => return ApiError::validation(e.to_string()),
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Configuration error: {}", err);
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures while loading `storefront.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside what the storefront accepts.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

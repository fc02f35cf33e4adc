//! # Checkout Commands
//!
//! The three-step checkout and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  start_checkout                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────┐ continue ┌──────────┐ continue ┌──────────┐              │
//! │  │ 1. Cart  │─────────►│2. Details│─────────►│3. Payment│              │
//! │  │          │◄─────────│          │◄─────────│          │              │
//! │  └──────────┘   back   └──────────┘   back   └────┬─────┘              │
//! │                                                   │                     │
//! │  apply_promo_code / set_fulfillment         place_order                 │
//! │  re-price the summary on every call               │                     │
//! │                                                   ▼                     │
//! │                                     Order recorded, cart emptied,       │
//! │                                     confirmation page shown             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response carries a freshly priced summary, so the order summary
//! panel never shows stale totals.

use rasoi_core::{
    Cart, CheckoutSession, ContactDetails, FulfillmentMode, Order, PaymentMethod,
    PricedOrderSummary, PromotionCode, PromotionOutcome,
};
use serde::Serialize;
use tracing::{debug, warn};

use super::today;
use crate::error::{ApiError, ErrorCode};
use crate::state::{
    CartState, CatalogState, CheckoutState, OrderState, SessionState, StorefrontConfig, View,
};

// =============================================================================
// Responses
// =============================================================================

/// Summary amounts formatted for display, e.g. "£34.60".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDisplay {
    pub subtotal: String,
    pub discount: String,
    pub delivery_fee: String,
    pub service_fee: String,
    pub total: String,
}

impl SummaryDisplay {
    fn new(summary: &PricedOrderSummary, config: &StorefrontConfig) -> Self {
        SummaryDisplay {
            subtotal: config.format_currency(summary.subtotal),
            discount: config.format_currency(summary.discount),
            delivery_fee: config.format_currency(summary.delivery_fee),
            service_fee: config.format_currency(summary.service_fee),
            total: config.format_currency(summary.total),
        }
    }
}

/// The checkout page: current step plus the order summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session: CheckoutSession,
    pub step_number: u8,
    pub progress_percent: f64,
    /// Unrounded amounts; use `display` for what the customer sees.
    pub summary: PricedOrderSummary,
    pub display: SummaryDisplay,
    /// Feedback under the promo box, e.g. why a code did not apply.
    pub promotion_message: Option<String>,
}

impl CheckoutResponse {
    fn new(session: &CheckoutSession, cart: &Cart, config: &StorefrontConfig) -> Self {
        let summary = session.quote(cart, today(), &config.fee_schedule());
        let promotion_message = match &summary.promotion {
            PromotionOutcome::NotRequested => None,
            PromotionOutcome::Applied { code } => Some(format!("{} applied", code)),
            PromotionOutcome::Rejected { reason, .. } => Some(reason.to_string()),
        };

        CheckoutResponse {
            session: session.clone(),
            step_number: session.step.number(),
            progress_percent: session.step.progress_percent(),
            display: SummaryDisplay::new(&summary, config),
            summary,
            promotion_message,
        }
    }
}

/// Shown on the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order: Order,
    pub fulfillment: FulfillmentMode,
    pub summary: PricedOrderSummary,
    pub display: SummaryDisplay,
    /// e.g. "25-30 minutes".
    pub estimated_time: String,
}

/// Runs `f` on the checkout session and re-prices the summary.
fn update<F>(
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
    f: F,
) -> Result<CheckoutResponse, ApiError>
where
    F: FnOnce(&mut CheckoutSession) -> Result<(), rasoi_core::CoreError>,
{
    let snapshot = cart.snapshot();
    checkout.with_session(|s| {
        f(s)?;
        Ok(CheckoutResponse::new(s, &snapshot, config))
    })
}

// =============================================================================
// Commands
// =============================================================================

/// Opens checkout for the restaurant whose cart the customer is holding.
pub fn start_checkout(
    catalog: &CatalogState,
    cart: &CartState,
    checkout: &CheckoutState,
    session: &SessionState,
    config: &StorefrontConfig,
    restaurant_slug: String,
) -> Result<CheckoutResponse, ApiError> {
    debug!(restaurant = %restaurant_slug, "start_checkout command");

    let restaurant = catalog.catalog().restaurant_by_slug(&restaurant_slug)?;
    let snapshot = cart.with_cart(|s| {
        let other_restaurant = s
            .restaurant_slug
            .as_deref()
            .is_some_and(|slug| slug != restaurant.slug);
        if other_restaurant && !s.cart.is_empty() {
            return Err(ApiError::new(
                ErrorCode::CartError,
                "Your cart has items from another restaurant",
            ));
        }
        Ok(s.cart.clone())
    })?;

    let started = checkout.begin(restaurant)?;
    session.navigate(View::Checkout {
        restaurant_slug: restaurant.slug.clone(),
    });

    Ok(CheckoutResponse::new(&started, &snapshot, config))
}

/// Gets the checkout in progress with a fresh summary.
pub fn get_checkout(
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
) -> Result<CheckoutResponse, ApiError> {
    debug!("get_checkout command");
    update(cart, checkout, config, |_| Ok(()))
}

/// The "Continue" button.
pub fn continue_checkout(
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
) -> Result<CheckoutResponse, ApiError> {
    debug!("continue_checkout command");
    let snapshot = cart.snapshot();
    update(cart, checkout, config, |s| s.advance(&snapshot).map(|_| ()))
}

/// The "Back" button inside checkout.
pub fn checkout_back(
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout_back command");
    update(cart, checkout, config, |s| s.back().map(|_| ()))
}

/// Delivery or collection. Changes the delivery fee.
pub fn set_fulfillment(
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
    mode: FulfillmentMode,
) -> Result<CheckoutResponse, ApiError> {
    debug!(mode = %mode, "set_fulfillment command");
    update(cart, checkout, config, |s| {
        s.set_fulfillment(mode);
        Ok(())
    })
}

/// Saves the details form. Validated when the customer continues.
pub fn set_contact_details(
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
    contact: ContactDetails,
) -> Result<CheckoutResponse, ApiError> {
    debug!("set_contact_details command");
    update(cart, checkout, config, |s| {
        s.set_contact(contact);
        Ok(())
    })
}

pub fn set_payment_method(
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
    method: PaymentMethod,
) -> Result<CheckoutResponse, ApiError> {
    debug!(method = ?method, "set_payment_method command");
    update(cart, checkout, config, |s| {
        s.set_payment_method(method);
        Ok(())
    })
}

/// The promo box "Apply" button.
///
/// Unknown codes are an error. Known codes that do not qualify yet are kept
/// and the response explains why they are not reducing the total.
pub fn apply_promo_code(
    catalog: &CatalogState,
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
    code: String,
) -> Result<CheckoutResponse, ApiError> {
    debug!(code = %code, "apply_promo_code command");

    let result = update(cart, checkout, config, |s| {
        s.apply_promotion(catalog.promotions(), &code).map(|_| ())
    });

    match &result {
        Ok(response) => {
            if let PromotionOutcome::Rejected { code, reason } = &response.summary.promotion {
                warn!(code = %code, reason = %reason, "Promo code does not apply");
            }
        }
        Err(e) => warn!(code = %code, error = %e, "Promo code rejected"),
    }

    result
}

pub fn remove_promo_code(
    cart: &CartState,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
) -> Result<CheckoutResponse, ApiError> {
    debug!("remove_promo_code command");
    update(cart, checkout, config, |s| {
        s.clear_promotion();
        Ok(())
    })
}

/// Codes advertised next to the promo box.
pub fn available_offers(catalog: &CatalogState) -> Vec<PromotionCode> {
    debug!("available_offers command");
    catalog
        .promotions()
        .offers(today())
        .into_iter()
        .cloned()
        .collect()
}

/// The "Place Order" button.
///
/// ## Process
/// 1. Check the checkout is on the payment step with a valid form
///    and the cart still belongs to the checkout's restaurant
/// 2. Price the cart one last time
/// 3. Record the order under the next order number
/// 4. Empty the cart, end checkout and show the confirmation page
pub fn place_order(
    cart: &CartState,
    checkout: &CheckoutState,
    orders: &OrderState,
    session: &SessionState,
    config: &StorefrontConfig,
) -> Result<OrderConfirmation, ApiError> {
    debug!("place_order command");

    let (cart_restaurant, snapshot) = cart.with_cart(|s| (s.restaurant_slug.clone(), s.cart.clone()));
    let today = today();
    let fees = config.fee_schedule();

    let placed = checkout.with_session(|s| s.place_order(&snapshot, today, &fees))?;
    if cart_restaurant.as_deref() != Some(placed.restaurant_slug.as_str()) {
        return Err(ApiError::new(
            ErrorCode::CartError,
            "Your cart has items from another restaurant",
        ));
    }
    let order = orders.with_book_mut(|b| b.record(&placed, today));

    cart.with_cart_mut(|s| s.clear());
    checkout.end();
    session.navigate(View::Confirmation {
        order_number: order.order_number.clone(),
    });

    Ok(OrderConfirmation {
        order,
        fulfillment: placed.fulfillment,
        display: SummaryDisplay::new(&placed.summary, config),
        summary: placed.summary,
        estimated_time: config.orders.estimated_delivery.clone(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

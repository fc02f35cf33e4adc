//! # Checkout
//!
//! The three-step checkout state machine.
//!
//! ## Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────┐  advance   ┌──────────┐  advance   ┌──────────┐         │
//! │   │ 1. Cart  │ ─────────► │2. Details│ ─────────► │3. Payment│         │
//! │   │  33%     │ ◄───────── │  67%     │ ◄───────── │  100%    │         │
//! │   └──────────┘   back     └──────────┘   back     └────┬─────┘         │
//! │        │                       │                       │ place_order    │
//! │   cart must not           name, phone, email;          ▼               │
//! │   be empty                address + postcode      PlacedOrder           │
//! │                           when delivering                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session never owns the cart; every operation that depends on it takes
//! the current cart by reference so the totals are always recomputed from
//! what the customer currently has.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartItem};
use crate::catalog::Restaurant;
use crate::error::{CoreError, CoreResult};
use crate::pricing::{price_with_fees, FeeSchedule};
use crate::promotion::PromotionRegistry;
use crate::types::{FulfillmentMode, PaymentMethod, PricedOrderSummary, PromotionCode};
use crate::validation::{
    validate_address, validate_customer_name, validate_email, validate_instructions,
    validate_phone, validate_postcode, ValidationResult,
};

// =============================================================================
// Checkout Step
// =============================================================================

/// Where the customer is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Cart,
    Details,
    Payment,
}

impl CheckoutStep {
    /// Number of steps in the flow.
    pub const COUNT: u8 = 3;

    /// 1-based position shown in the step indicator.
    pub const fn number(&self) -> u8 {
        match self {
            CheckoutStep::Cart => 1,
            CheckoutStep::Details => 2,
            CheckoutStep::Payment => 3,
        }
    }

    /// Width of the progress bar: `step / 3 * 100`.
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.number()) / f64::from(Self::COUNT) * 100.0
    }

    pub const fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Cart => Some(CheckoutStep::Details),
            CheckoutStep::Details => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => None,
        }
    }

    pub const fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Cart => None,
            CheckoutStep::Details => Some(CheckoutStep::Cart),
            CheckoutStep::Payment => Some(CheckoutStep::Details),
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStep::Cart => f.write_str("cart"),
            CheckoutStep::Details => f.write_str("details"),
            CheckoutStep::Payment => f.write_str("payment"),
        }
    }
}

// =============================================================================
// Contact Details
// =============================================================================

/// What the customer types on the details step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub postcode: String,
    pub instructions: Option<String>,
}

impl ContactDetails {
    /// Checks the fields the fulfillment mode needs.
    ///
    /// Collection orders skip the address and postcode.
    pub fn validate(&self, mode: FulfillmentMode) -> ValidationResult<()> {
        validate_customer_name(&self.name)?;
        validate_phone(&self.phone)?;
        validate_email(&self.email)?;

        if mode.needs_address() {
            validate_address(&self.address)?;
            validate_postcode(&self.postcode)?;
        }

        if let Some(instructions) = &self.instructions {
            validate_instructions(instructions)?;
        }

        Ok(())
    }

    /// One-line address for the order record, e.g. "1 High St, SW1A 1AA".
    pub fn delivery_address(&self) -> String {
        format!("{}, {}", self.address.trim(), self.postcode.trim().to_uppercase())
    }
}

// =============================================================================
// Placed Order
// =============================================================================

/// Everything captured when the customer presses "Place Order".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub restaurant_slug: String,
    pub restaurant_name: String,
    pub items: Vec<CartItem>,
    pub fulfillment: FulfillmentMode,
    pub contact: ContactDetails,
    pub payment_method: PaymentMethod,
    pub summary: PricedOrderSummary,
}

impl PlacedOrder {
    /// Address recorded on the order; collection orders have none.
    pub fn delivery_address(&self) -> Option<String> {
        self.fulfillment
            .needs_address()
            .then(|| self.contact.delivery_address())
    }
}

// =============================================================================
// Checkout Session
// =============================================================================

/// One pass through checkout for one restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub restaurant_slug: String,
    pub restaurant_name: String,
    pub step: CheckoutStep,
    pub fulfillment: FulfillmentMode,
    pub contact: ContactDetails,
    pub payment_method: PaymentMethod,
    /// The code the customer applied, already resolved against the registry.
    pub promotion: Option<PromotionCode>,
}

impl CheckoutSession {
    /// Starts checkout at the cart step. Closed restaurants take no orders.
    pub fn start(restaurant: &Restaurant) -> CoreResult<Self> {
        if !restaurant.is_open {
            return Err(CoreError::RestaurantClosed {
                name: restaurant.name.clone(),
            });
        }

        Ok(CheckoutSession {
            restaurant_slug: restaurant.slug.clone(),
            restaurant_name: restaurant.name.clone(),
            step: CheckoutStep::Cart,
            fulfillment: FulfillmentMode::default(),
            contact: ContactDetails::default(),
            payment_method: PaymentMethod::default(),
            promotion: None,
        })
    }

    /// Moves to the next step once the current one is complete.
    pub fn advance(&mut self, cart: &Cart) -> CoreResult<CheckoutStep> {
        match self.step {
            CheckoutStep::Cart => {
                if cart.is_empty() {
                    return Err(CoreError::EmptyCart);
                }
            }
            CheckoutStep::Details => self.contact.validate(self.fulfillment)?,
            CheckoutStep::Payment => {}
        }

        let next = self.step.next().ok_or(CoreError::InvalidCheckoutStep {
            action: "continue",
            current: self.step,
        })?;
        self.step = next;
        Ok(next)
    }

    /// Returns to the previous step.
    pub fn back(&mut self) -> CoreResult<CheckoutStep> {
        let previous = self.step.previous().ok_or(CoreError::InvalidCheckoutStep {
            action: "go back",
            current: self.step,
        })?;
        self.step = previous;
        Ok(previous)
    }

    pub fn set_fulfillment(&mut self, mode: FulfillmentMode) {
        self.fulfillment = mode;
    }

    pub fn set_contact(&mut self, contact: ContactDetails) {
        self.contact = contact;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Resolves what the customer typed in the promo box and keeps it.
    ///
    /// Whether the code qualifies is decided at every quote, so a code
    /// applied below its minimum starts working once the cart grows.
    pub fn apply_promotion(
        &mut self,
        registry: &PromotionRegistry,
        input: &str,
    ) -> CoreResult<&PromotionCode> {
        let code = registry.lookup(input)?.clone();
        Ok(&*self.promotion.insert(code))
    }

    pub fn clear_promotion(&mut self) {
        self.promotion = None;
    }

    /// Prices the current cart for the order summary panel.
    pub fn quote(&self, cart: &Cart, today: NaiveDate, fees: &FeeSchedule) -> PricedOrderSummary {
        price_with_fees(
            &cart.lines(),
            self.fulfillment,
            self.promotion.as_ref(),
            today,
            fees,
        )
    }

    /// Captures the order. Only legal on the payment step.
    pub fn place_order(
        &self,
        cart: &Cart,
        today: NaiveDate,
        fees: &FeeSchedule,
    ) -> CoreResult<PlacedOrder> {
        if self.step != CheckoutStep::Payment {
            return Err(CoreError::InvalidCheckoutStep {
                action: "place an order",
                current: self.step,
            });
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        self.contact.validate(self.fulfillment)?;

        Ok(PlacedOrder {
            restaurant_slug: self.restaurant_slug.clone(),
            restaurant_name: self.restaurant_name.clone(),
            items: cart.items.clone(),
            fulfillment: self.fulfillment,
            contact: self.contact.clone(),
            payment_method: self.payment_method,
            summary: self.quote(cart, today, fees),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::ValidationError;
    use crate::types::PromotionOutcome;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "John Doe".to_string(),
            phone: "+44 7700 900000".to_string(),
            email: "john@example.com".to_string(),
            address: "123 Main Street, London".to_string(),
            postcode: "sw1a 1aa".to_string(),
            instructions: None,
        }
    }

    fn setup() -> (CheckoutSession, Cart) {
        let catalog = Catalog::demo();
        let session =
            CheckoutSession::start(catalog.restaurant_by_slug("spice-garden").unwrap()).unwrap();
        let mut cart = Cart::new();
        cart.add_item(catalog.menu_item("1").unwrap(), 2).unwrap();
        cart.add_item(catalog.menu_item("6").unwrap(), 1).unwrap();
        (session, cart)
    }

    #[test]
    fn test_step_numbers_and_progress() {
        assert_eq!(CheckoutStep::Cart.number(), 1);
        assert_eq!(CheckoutStep::Payment.number(), 3);
        assert_eq!(CheckoutStep::Payment.progress_percent(), 100.0);
        assert!((CheckoutStep::Cart.progress_percent() - 33.333).abs() < 0.001);
    }

    #[test]
    fn test_closed_restaurant_cannot_start_checkout() {
        let catalog = Catalog::demo();
        let closed = catalog.restaurant_by_slug("mediterranean-kitchen").unwrap();
        assert!(matches!(
            CheckoutSession::start(closed),
            Err(CoreError::RestaurantClosed { .. })
        ));
    }

    #[test]
    fn test_empty_cart_cannot_advance() {
        let (mut session, _) = setup();
        assert!(matches!(
            session.advance(&Cart::new()),
            Err(CoreError::EmptyCart)
        ));
        assert_eq!(session.step, CheckoutStep::Cart);
    }

    #[test]
    fn test_details_required_before_payment() {
        let (mut session, cart) = setup();
        session.advance(&cart).unwrap();

        let err = session.advance(&cart).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "name"
        ));

        session.set_contact(contact());
        assert_eq!(session.advance(&cart).unwrap(), CheckoutStep::Payment);
    }

    #[test]
    fn test_collection_skips_address() {
        let (mut session, cart) = setup();
        session.set_fulfillment(FulfillmentMode::Collection);
        session.set_contact(ContactDetails {
            address: String::new(),
            postcode: String::new(),
            ..contact()
        });

        session.advance(&cart).unwrap();
        assert_eq!(session.advance(&cart).unwrap(), CheckoutStep::Payment);
    }

    #[test]
    fn test_delivery_requires_address() {
        let (mut session, cart) = setup();
        session.set_contact(ContactDetails {
            address: String::new(),
            ..contact()
        });

        session.advance(&cart).unwrap();
        assert!(session.advance(&cart).is_err());
    }

    #[test]
    fn test_back_stops_at_cart() {
        let (mut session, cart) = setup();
        session.advance(&cart).unwrap();
        assert_eq!(session.back().unwrap(), CheckoutStep::Cart);
        assert!(matches!(
            session.back(),
            Err(CoreError::InvalidCheckoutStep { .. })
        ));
    }

    #[test]
    fn test_cannot_place_order_before_payment() {
        let (mut session, cart) = setup();
        session.set_contact(contact());
        session.advance(&cart).unwrap();

        let err = session.place_order(&cart, today(), &FeeSchedule::default()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot place an order during the details step");
    }

    #[test]
    fn test_promotion_is_applied_to_quote() {
        let (mut session, cart) = setup();
        let registry = PromotionRegistry::demo();

        assert_eq!(session.apply_promotion(&registry, " save10 ").unwrap().code, "SAVE10");
        let summary = session.quote(&cart, today(), &FeeSchedule::default());
        assert_eq!(summary.total.amount(), dec!(34.603));

        assert!(session.apply_promotion(&registry, "NOPE").is_err());
        // A bad code does not wipe the previous one
        assert!(session.promotion.is_some());

        session.clear_promotion();
        let summary = session.quote(&cart, today(), &FeeSchedule::default());
        assert_eq!(summary.promotion, PromotionOutcome::NotRequested);
    }

    #[test]
    fn test_place_order() {
        let (mut session, cart) = setup();
        session.set_contact(contact());
        session.set_payment_method(PaymentMethod::Cash);
        session.advance(&cart).unwrap();
        session.advance(&cart).unwrap();

        let placed = session.place_order(&cart, today(), &FeeSchedule::default()).unwrap();
        assert_eq!(placed.restaurant_name, "Spice Garden");
        assert_eq!(placed.items.len(), 2);
        assert_eq!(placed.payment_method, PaymentMethod::Cash);
        assert_eq!(placed.summary.total.amount(), dec!(37.95));
        assert_eq!(
            placed.delivery_address().as_deref(),
            Some("123 Main Street, London, SW1A 1AA")
        );
    }
}

//! # Checkout State
//!
//! The checkout in progress, if any. Starting checkout for another
//! restaurant replaces it; placing the order ends it.

use std::sync::{Arc, Mutex};

use rasoi_core::{CheckoutSession, CoreError, Restaurant};
use tracing::debug;

use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct CheckoutState {
    session: Arc<Mutex<Option<CheckoutSession>>>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh checkout for `restaurant` at the cart step.
    pub fn begin(&self, restaurant: &Restaurant) -> Result<CheckoutSession, ApiError> {
        let session = CheckoutSession::start(restaurant)?;
        debug!(restaurant = %restaurant.slug, "Checkout started");

        let mut slot = self.session.lock().expect("Checkout mutex poisoned");
        *slot = Some(session.clone());
        Ok(session)
    }

    /// Runs `f` against the checkout in progress.
    pub fn with_session<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut CheckoutSession) -> Result<R, CoreError>,
    {
        let mut slot = self.session.lock().expect("Checkout mutex poisoned");
        let session = slot
            .as_mut()
            .ok_or_else(|| ApiError::checkout("No checkout in progress"))?;
        Ok(f(session)?)
    }

    pub fn current(&self) -> Option<CheckoutSession> {
        self.session.lock().expect("Checkout mutex poisoned").clone()
    }

    /// Ends the checkout (order placed or abandoned).
    pub fn end(&self) {
        self.session.lock().expect("Checkout mutex poisoned").take();
    }
}

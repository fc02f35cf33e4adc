//! # Session State
//!
//! Which page the customer is looking at. The view only changes through
//! [`SessionState::navigate`] and [`SessionState::back`].

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A page of the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum View {
    #[default]
    Landing,
    #[serde(rename_all = "camelCase")]
    Restaurant { slug: String },
    Search,
    #[serde(rename_all = "camelCase")]
    Checkout { restaurant_slug: String },
    #[serde(rename_all = "camelCase")]
    Confirmation { order_number: String },
    #[serde(rename_all = "camelCase")]
    Tracking { order_number: String },
    Account,
}

impl View {
    /// Where the back button leads. Checkout returns to its restaurant,
    /// everything else to the landing page.
    pub fn back(&self) -> View {
        match self {
            View::Checkout { restaurant_slug } => View::Restaurant {
                slug: restaurant_slug.clone(),
            },
            _ => View::Landing,
        }
    }

    /// Page title for the header.
    pub fn title(&self) -> &'static str {
        match self {
            View::Landing => "Home",
            View::Restaurant { .. } => "Restaurant",
            View::Search => "Search",
            View::Checkout { .. } => "Checkout",
            View::Confirmation { .. } => "Order Confirmed",
            View::Tracking { .. } => "Track Order",
            View::Account => "My Account",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    view: Arc<Mutex<View>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.view.lock().expect("Session mutex poisoned").clone()
    }

    pub fn navigate(&self, to: View) -> View {
        let mut view = self.view.lock().expect("Session mutex poisoned");
        debug!(from = ?*view, to = ?to, "Navigate");
        *view = to.clone();
        to
    }

    pub fn back(&self) -> View {
        let mut view = self.view.lock().expect("Session mutex poisoned");
        let to = view.back();
        debug!(from = ?*view, to = ?to, "Navigate back");
        *view = to.clone();
        to
    }
}

//! # Config Commands
//!
//! Store settings the UI needs for formatting and copy.

use serde::Serialize;
use tracing::debug;

use crate::state::StorefrontConfig;

/// What the UI shows from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub store_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    /// Formatted, e.g. "£2.99".
    pub delivery_fee: String,
    pub service_fee: String,
    pub estimated_delivery: String,
}

/// Gets the storefront configuration.
pub fn get_config(config: &StorefrontConfig) -> ConfigResponse {
    debug!("get_config command");
    let fees = config.fee_schedule();

    ConfigResponse {
        store_name: config.store.name.clone(),
        currency_code: config.store.currency_code.clone(),
        currency_symbol: config.store.currency_symbol.clone(),
        delivery_fee: config.format_currency(fees.delivery_fee),
        service_fee: config.format_currency(fees.service_fee),
        estimated_delivery: config.orders.estimated_delivery.clone(),
    }
}

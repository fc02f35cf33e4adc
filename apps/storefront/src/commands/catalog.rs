//! # Catalog Commands
//!
//! Restaurant listings and menus.

use rasoi_core::catalog::MenuSection;
use rasoi_core::search::restaurants_by_cuisine as by_cuisine;
use rasoi_core::Restaurant;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, SessionState, View};

/// A restaurant page: details plus its menu grouped by category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPage {
    pub restaurant: Restaurant,
    pub sections: Vec<MenuSection>,
}

/// All restaurants for the landing page.
pub fn list_restaurants(catalog: &CatalogState) -> Vec<Restaurant> {
    debug!("list_restaurants command");
    catalog.catalog().restaurants().to_vec()
}

/// Opens a restaurant's page.
pub fn get_restaurant(
    catalog: &CatalogState,
    session: &SessionState,
    slug: String,
) -> Result<RestaurantPage, ApiError> {
    debug!(slug = %slug, "get_restaurant command");

    let restaurant = catalog.catalog().restaurant_by_slug(&slug)?.clone();
    session.navigate(View::Restaurant { slug });

    Ok(RestaurantPage {
        restaurant,
        sections: catalog.catalog().menu_sections(),
    })
}

/// Restaurants behind a cuisine tile.
pub fn restaurants_by_cuisine(catalog: &CatalogState, cuisine: String) -> Vec<Restaurant> {
    debug!(cuisine = %cuisine, "restaurants_by_cuisine command");
    by_cuisine(catalog.catalog(), &cuisine)
        .into_iter()
        .cloned()
        .collect()
}

//! # Search Commands

use rasoi_core::search::{self, SearchFilters, SearchResults, CUISINES, DIETARY_FILTERS, POPULAR_SEARCHES};
use rasoi_core::validation::validate_search_query;
use rasoi_core::CoreError;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, SessionState, View};

/// Searches restaurants and dishes and shows the results page.
///
/// A blank query returns no results rather than everything.
pub fn search(
    catalog: &CatalogState,
    session: &SessionState,
    query: String,
    filters: Option<SearchFilters>,
) -> Result<SearchResults, ApiError> {
    let query = validate_search_query(&query).map_err(CoreError::from)?;
    let filters = filters.unwrap_or_default();
    debug!(query = %query, dietary = ?filters.dietary, "search command");

    let results = search::search(catalog.catalog(), &query, &filters);
    debug!(
        restaurants = results.restaurants.len(),
        menu_items = results.menu_items.len(),
        "Search complete"
    );

    session.navigate(View::Search);
    Ok(results)
}

pub fn popular_searches() -> Vec<&'static str> {
    POPULAR_SEARCHES.to_vec()
}

pub fn dietary_filters() -> Vec<&'static str> {
    DIETARY_FILTERS.to_vec()
}

pub fn cuisines() -> Vec<&'static str> {
    CUISINES.to_vec()
}

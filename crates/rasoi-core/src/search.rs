//! # Search
//!
//! Free-text search over restaurants and dishes.
//!
//! Matching is a case-insensitive substring test of the trimmed query:
//! - restaurants: name or any cuisine
//! - dishes: name, description, category, search tags, dietary tags or
//!   allergens
//!
//! Dietary filters narrow the dish results to items carrying every selected
//! tag. They never affect restaurants.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Catalog, MenuItem, Restaurant};

/// Suggestions shown under an empty search box.
pub const POPULAR_SEARCHES: &[&str] = &[
    "Pizza", "Sushi", "Burger", "Indian", "Vegan", "Spicy", "Healthy", "Dessert",
];

/// Dietary filter chips.
pub const DIETARY_FILTERS: &[&str] = &["Vegetarian", "Vegan", "Gluten-Free", "Dairy-Free", "Nut-Free"];

/// Cuisine tiles on the landing page.
pub const CUISINES: &[&str] = &[
    "Indian",
    "Italian",
    "Japanese",
    "American",
    "Thai",
    "Mediterranean",
    "Chinese",
    "Mexican",
];

/// Filters applied on top of the text query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub dietary: Vec<String>,
}

/// What matched a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: String,
    pub restaurants: Vec<Restaurant>,
    pub menu_items: Vec<MenuItem>,
}

impl SearchResults {
    pub fn total_count(&self) -> usize {
        self.restaurants.len() + self.menu_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn any_contains(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| contains(v, needle))
}

fn restaurant_matches(restaurant: &Restaurant, needle: &str) -> bool {
    contains(&restaurant.name, needle) || any_contains(&restaurant.cuisines, needle)
}

fn menu_item_matches(item: &MenuItem, needle: &str) -> bool {
    contains(&item.name, needle)
        || contains(&item.description, needle)
        || contains(&item.category, needle)
        || any_contains(&item.search_tags, needle)
        || any_contains(&item.dietary_tags, needle)
        || any_contains(&item.allergens, needle)
}

/// Searches the catalog. A blank query matches nothing.
pub fn search(catalog: &Catalog, query: &str, filters: &SearchFilters) -> SearchResults {
    let query = query.trim();
    if query.is_empty() {
        return SearchResults::default();
    }
    let needle = query.to_lowercase();

    let restaurants = catalog
        .restaurants()
        .iter()
        .filter(|r| restaurant_matches(r, &needle))
        .cloned()
        .collect();

    let menu_items = catalog
        .menu()
        .iter()
        .filter(|m| menu_item_matches(m, &needle))
        .filter(|m| filters.dietary.iter().all(|tag| m.has_dietary_tag(tag)))
        .cloned()
        .collect();

    SearchResults {
        query: query.to_string(),
        restaurants,
        menu_items,
    }
}

/// Restaurants serving `cuisine` (landing page tiles).
pub fn restaurants_by_cuisine<'a>(catalog: &'a Catalog, cuisine: &str) -> Vec<&'a Restaurant> {
    catalog
        .restaurants()
        .iter()
        .filter(|r| r.cuisines.iter().any(|c| c.eq_ignore_ascii_case(cuisine)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(results: &SearchResults) -> Vec<&str> {
        results.menu_items.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let catalog = Catalog::demo();
        assert!(search(&catalog, "   ", &SearchFilters::default()).is_empty());
    }

    #[test]
    fn test_restaurant_by_cuisine_text() {
        let catalog = Catalog::demo();
        let results = search(&catalog, "SUSHI", &SearchFilters::default());
        assert_eq!(results.restaurants.len(), 1);
        assert_eq!(results.restaurants[0].slug, "sushi-master");
        assert_eq!(results.query, "SUSHI");
    }

    #[test]
    fn test_menu_item_by_search_tag() {
        let catalog = Catalog::demo();
        let results = search(&catalog, "naan", &SearchFilters::default());
        assert_eq!(names(&results), vec!["Garlic Naan"]);
    }

    #[test]
    fn test_menu_item_by_allergen() {
        let catalog = Catalog::demo();
        let results = search(&catalog, "nuts", &SearchFilters::default());
        assert_eq!(names(&results), vec!["Butter Chicken"]);
    }

    #[test]
    fn test_dietary_filters_narrow_results() {
        let catalog = Catalog::demo();
        let all = search(&catalog, "indian", &SearchFilters::default());
        let vegan = search(
            &catalog,
            "indian",
            &SearchFilters {
                dietary: vec!["Vegan".to_string()],
            },
        );

        assert!(vegan.menu_items.len() < all.menu_items.len());
        assert_eq!(names(&vegan), vec!["Vegetable Biryani"]);
        // Restaurants are unaffected by dietary filters
        assert_eq!(vegan.restaurants.len(), all.restaurants.len());
    }

    #[test]
    fn test_restaurants_by_cuisine() {
        let catalog = Catalog::demo();
        let italian = restaurants_by_cuisine(&catalog, "italian");
        assert_eq!(italian.len(), 1);
        assert_eq!(italian[0].name, "Pizza Perfetto");
        assert!(restaurants_by_cuisine(&catalog, "Mexican").is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(POPULAR_SEARCHES.len(), 8);
        assert!(DIETARY_FILTERS.contains(&"Gluten-Free"));
        assert_eq!(CUISINES[0], "Indian");
    }
}

//! # Catalog
//!
//! Restaurants and menu items offered by the storefront.
//!
//! The catalog is read-only reference data. The demo build loads it from
//! [`crate::fixtures`]; nothing in this crate mutates it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::fixtures;
use crate::money::Money;

// =============================================================================
// Restaurant
// =============================================================================

/// Opening hours for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub day: String,
    pub open: String,
    pub close: String,
    pub closed: bool,
}

/// A restaurant listed on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// URL-safe key used for navigation, e.g. "spice-garden".
    pub slug: String,
    pub cuisines: Vec<String>,
    pub rating: f32,
    pub review_count: u32,
    /// Customer-facing estimate, e.g. "20-30 min".
    pub delivery_time: String,
    /// Advertised on the listing card only; checkout uses the fee schedule.
    pub delivery_fee: Money,
    pub minimum_order: Money,
    pub is_open: bool,
    pub hours: String,
    pub detailed_hours: Vec<DayHours>,
    pub phone: String,
    pub email: String,
    pub address: String,
}

// =============================================================================
// Menu Item
// =============================================================================

/// How hot a dish is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
    Authentic,
}

/// A dish that can be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub available: bool,
    pub spice_level: Option<SpiceLevel>,
    /// e.g. "Vegetarian", "Vegan", "Gluten-Free".
    pub dietary_tags: Vec<String>,
    /// e.g. "Best Seller", "Chef's Special".
    pub special_tags: Vec<String>,
    pub occasion_tags: Vec<String>,
    pub allergens: Vec<String>,
    pub calories: Option<u32>,
    /// Extra keywords matched by search.
    pub search_tags: Vec<String>,
}

impl MenuItem {
    /// True when the item carries `tag` among its dietary tags (case-insensitive).
    pub fn has_dietary_tag(&self, tag: &str) -> bool {
        self.dietary_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Menu items sharing a category, in menu order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub category: String,
    pub items: Vec<MenuItem>,
}

// =============================================================================
// Catalog
// =============================================================================

/// All restaurants and the menu served by the storefront.
///
/// The demo platform shows the same menu on every storefront page.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
    menu: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>, menu: Vec<MenuItem>) -> Self {
        Catalog { restaurants, menu }
    }

    /// Catalog loaded with the demo fixtures.
    pub fn demo() -> Self {
        Self::new(fixtures::restaurants(), fixtures::menu_items())
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub fn restaurant_by_slug(&self, slug: &str) -> CoreResult<&Restaurant> {
        self.restaurants
            .iter()
            .find(|r| r.slug == slug)
            .ok_or_else(|| CoreError::RestaurantNotFound(slug.to_string()))
    }

    pub fn restaurant_by_name(&self, name: &str) -> CoreResult<&Restaurant> {
        self.restaurants
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| CoreError::RestaurantNotFound(name.to_string()))
    }

    pub fn menu_item(&self, id: &str) -> CoreResult<&MenuItem> {
        self.menu
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::MenuItemNotFound(id.to_string()))
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.menu {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    /// The menu grouped by category for the storefront tabs.
    pub fn menu_sections(&self) -> Vec<MenuSection> {
        self.categories()
            .into_iter()
            .map(|category| MenuSection {
                category: category.to_string(),
                items: self
                    .menu
                    .iter()
                    .filter(|m| m.category == category)
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_by_slug() {
        let catalog = Catalog::demo();
        let r = catalog.restaurant_by_slug("spice-garden").unwrap();
        assert_eq!(r.name, "Spice Garden");
        assert!(matches!(
            catalog.restaurant_by_slug("nope"),
            Err(CoreError::RestaurantNotFound(_))
        ));
    }

    #[test]
    fn test_menu_item_lookup() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.menu_item("1").unwrap().name, "Butter Chicken");
        assert!(catalog.menu_item("999").is_err());
    }

    #[test]
    fn test_categories_in_menu_order() {
        let catalog = Catalog::demo();
        assert_eq!(
            catalog.categories(),
            vec!["Main Course", "Starters", "Breads", "Beverages"]
        );
    }

    #[test]
    fn test_menu_sections_cover_every_item() {
        let catalog = Catalog::demo();
        let sections = catalog.menu_sections();
        let count: usize = sections.iter().map(|s| s.items.len()).sum();
        assert_eq!(count, catalog.menu().len());
        assert_eq!(sections[0].category, "Main Course");
    }

    #[test]
    fn test_dietary_tag_match() {
        let catalog = Catalog::demo();
        let biryani = catalog.menu_item("3").unwrap();
        assert!(biryani.has_dietary_tag("vegan"));
        assert!(!biryani.has_dietary_tag("Contains Dairy"));
    }
}

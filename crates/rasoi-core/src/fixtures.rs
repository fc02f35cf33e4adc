//! # Demo Fixtures
//!
//! In-memory reference data for the demo storefront: six restaurants, one
//! shared menu, the promotion codes and two past orders.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::catalog::{DayHours, MenuItem, Restaurant, SpiceLevel};
use crate::money::Money;
use crate::order::{MessageSender, Order, OrderItem, OrderMessage, OrderStatus};
use crate::types::{PromotionCode, PromotionKind};

/// Delivery address used by the demo customer's past orders.
pub const DEMO_DELIVERY_ADDRESS: &str = "123 Main Street, London, SW1A 1AA";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn week(open: &str, close: &str) -> Vec<DayHours> {
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        .iter()
        .map(|day| DayHours {
            day: day.to_string(),
            open: open.to_string(),
            close: close.to_string(),
            closed: false,
        })
        .collect()
}

struct RestaurantSeed {
    id: &'static str,
    name: &'static str,
    slug: &'static str,
    cuisines: [&'static str; 2],
    rating: f32,
    review_count: u32,
    delivery_time: &'static str,
    delivery_fee: i64,
    minimum_order: i64,
    is_open: bool,
    hours: &'static str,
    phone: &'static str,
    email: &'static str,
    address: &'static str,
}

impl RestaurantSeed {
    fn build(self, detailed_hours: Vec<DayHours>) -> Restaurant {
        Restaurant {
            id: self.id.to_string(),
            name: self.name.to_string(),
            slug: self.slug.to_string(),
            cuisines: strings(&self.cuisines),
            rating: self.rating,
            review_count: self.review_count,
            delivery_time: self.delivery_time.to_string(),
            delivery_fee: Money::from_minor(self.delivery_fee),
            minimum_order: Money::from_minor(self.minimum_order),
            is_open: self.is_open,
            hours: self.hours.to_string(),
            detailed_hours,
            phone: self.phone.to_string(),
            email: self.email.to_string(),
            address: self.address.to_string(),
        }
    }
}

/// The restaurants listed on the landing page.
pub fn restaurants() -> Vec<Restaurant> {
    let mut spice_garden_hours = week("11:00 AM", "10:00 PM");
    for day in spice_garden_hours.iter_mut() {
        match day.day.as_str() {
            "Friday" | "Saturday" => day.close = "11:00 PM".to_string(),
            "Sunday" => day.open = "12:00 PM".to_string(),
            _ => {}
        }
    }

    let mut sushi_master_hours = week("12:00 PM", "10:00 PM");
    if let Some(sunday) = sushi_master_hours.last_mut() {
        sunday.closed = true;
    }

    vec![
        RestaurantSeed {
            id: "1",
            name: "Spice Garden",
            slug: "spice-garden",
            cuisines: ["Indian", "Vegetarian"],
            rating: 4.5,
            review_count: 324,
            delivery_time: "20-30 min",
            delivery_fee: 299,
            minimum_order: 1500,
            is_open: true,
            hours: "Mon-Sun: 11:00 AM - 10:00 PM",
            phone: "+44 20 1234 5678",
            email: "hello@spicegarden.com",
            address: "123 Curry Lane, London, SW1A 1AA",
        }
        .build(spice_garden_hours),
        RestaurantSeed {
            id: "2",
            name: "Urban Grill",
            slug: "urban-grill",
            cuisines: ["American", "Burgers"],
            rating: 4.7,
            review_count: 512,
            delivery_time: "25-35 min",
            delivery_fee: 349,
            minimum_order: 2000,
            is_open: true,
            hours: "Mon-Sun: 12:00 PM - 11:00 PM",
            phone: "+44 20 9876 5432",
            email: "info@urbangrill.com",
            address: "456 Burger Street, London, W1A 1AB",
        }
        .build(week("12:00 PM", "11:00 PM")),
        RestaurantSeed {
            id: "3",
            name: "Sushi Master",
            slug: "sushi-master",
            cuisines: ["Japanese", "Sushi"],
            rating: 4.8,
            review_count: 289,
            delivery_time: "30-40 min",
            delivery_fee: 499,
            minimum_order: 2500,
            is_open: true,
            hours: "Mon-Sat: 12:00 PM - 10:00 PM",
            phone: "+44 20 5555 1234",
            email: "contact@sushimaster.com",
            address: "789 Sushi Street, London, E1 6AN",
        }
        .build(sushi_master_hours),
        RestaurantSeed {
            id: "4",
            name: "Mediterranean Kitchen",
            slug: "mediterranean-kitchen",
            cuisines: ["Mediterranean", "Healthy"],
            rating: 4.6,
            review_count: 198,
            delivery_time: "20-30 min",
            delivery_fee: 249,
            minimum_order: 1500,
            is_open: false,
            hours: "Mon-Sun: 11:00 AM - 9:00 PM",
            phone: "+44 20 7777 8888",
            email: "info@medkitchen.com",
            address: "321 Mediterranean Ave, London, NW1 2FB",
        }
        .build(week("11:00 AM", "9:00 PM")),
        RestaurantSeed {
            id: "5",
            name: "Thai Fusion",
            slug: "thai-fusion",
            cuisines: ["Thai", "Asian"],
            rating: 4.4,
            review_count: 423,
            delivery_time: "25-35 min",
            delivery_fee: 399,
            minimum_order: 1800,
            is_open: true,
            hours: "Mon-Sun: 11:30 AM - 10:30 PM",
            phone: "+44 20 3333 4444",
            email: "hello@thaifusion.com",
            address: "654 Thai Road, London, SE1 9SG",
        }
        .build(week("11:30 AM", "10:30 PM")),
        RestaurantSeed {
            id: "6",
            name: "Pizza Perfetto",
            slug: "pizza-perfetto",
            cuisines: ["Italian", "Pizza"],
            rating: 4.5,
            review_count: 678,
            delivery_time: "20-30 min",
            delivery_fee: 299,
            minimum_order: 1200,
            is_open: true,
            hours: "Mon-Sun: 11:00 AM - 11:00 PM",
            phone: "+44 20 6666 7777",
            email: "ciao@pizzaperfetto.com",
            address: "987 Pizza Plaza, London, WC2N 5DU",
        }
        .build(week("11:00 AM", "11:00 PM")),
    ]
}

struct MenuSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: i64,
    category: &'static str,
    spice_level: Option<SpiceLevel>,
    dietary_tags: &'static [&'static str],
    special_tags: &'static [&'static str],
    occasion_tags: &'static [&'static str],
    allergens: &'static [&'static str],
    calories: u32,
    search_tags: &'static [&'static str],
}

impl From<MenuSeed> for MenuItem {
    fn from(seed: MenuSeed) -> Self {
        MenuItem {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: Money::from_minor(seed.price),
            category: seed.category.to_string(),
            available: true,
            spice_level: seed.spice_level,
            dietary_tags: strings(seed.dietary_tags),
            special_tags: strings(seed.special_tags),
            occasion_tags: strings(seed.occasion_tags),
            allergens: strings(seed.allergens),
            calories: Some(seed.calories),
            search_tags: strings(seed.search_tags),
        }
    }
}

/// The menu shown on every restaurant page.
pub fn menu_items() -> Vec<MenuItem> {
    [
        MenuSeed {
            id: "1",
            name: "Butter Chicken",
            description: "Tender chicken in creamy tomato sauce with aromatic spices",
            price: 1499,
            category: "Main Course",
            spice_level: Some(SpiceLevel::Medium),
            dietary_tags: &["Non-Veg", "Contains Dairy"],
            special_tags: &["Best Seller", "Chef's Special"],
            occasion_tags: &["Dinner", "Family Meal"],
            allergens: &["Dairy", "Nuts"],
            calories: 485,
            search_tags: &["butter chicken", "curry", "chicken", "indian", "creamy", "spicy"],
        },
        MenuSeed {
            id: "2",
            name: "Paneer Tikka",
            description: "Marinated cottage cheese grilled with bell peppers and onions",
            price: 1299,
            category: "Starters",
            spice_level: Some(SpiceLevel::Medium),
            dietary_tags: &["Vegetarian", "Contains Dairy"],
            special_tags: &["Best Seller"],
            occasion_tags: &["Appetizer", "Party"],
            allergens: &["Dairy"],
            calories: 320,
            search_tags: &["paneer", "tikka", "starter", "grilled", "vegetarian", "cheese"],
        },
        MenuSeed {
            id: "3",
            name: "Vegetable Biryani",
            description: "Fragrant basmati rice with mixed vegetables and spices",
            price: 1349,
            category: "Main Course",
            spice_level: Some(SpiceLevel::Mild),
            dietary_tags: &["Vegan", "Gluten-Free"],
            special_tags: &["Seasonal"],
            occasion_tags: &["Lunch", "Dinner"],
            allergens: &[],
            calories: 395,
            search_tags: &["biryani", "rice", "vegan", "vegetables", "indian", "aromatic"],
        },
        MenuSeed {
            id: "4",
            name: "Samosa (2 pcs)",
            description: "Crispy pastry filled with spiced potatoes and peas",
            price: 599,
            category: "Starters",
            spice_level: Some(SpiceLevel::Mild),
            dietary_tags: &["Vegan"],
            special_tags: &["Best Seller"],
            occasion_tags: &["Snack", "Tea Time"],
            allergens: &["Gluten"],
            calories: 262,
            search_tags: &["samosa", "fried", "snack", "potato", "vegan", "crispy"],
        },
        MenuSeed {
            id: "5",
            name: "Chicken Tikka Masala",
            description: "Grilled chicken in rich spiced curry sauce",
            price: 1599,
            category: "Main Course",
            spice_level: Some(SpiceLevel::Hot),
            dietary_tags: &["Non-Veg", "Contains Dairy"],
            special_tags: &["Chef's Special", "Best Seller"],
            occasion_tags: &["Dinner", "Date Night"],
            allergens: &["Dairy"],
            calories: 520,
            search_tags: &["tikka masala", "chicken", "curry", "spicy", "indian", "grilled"],
        },
        MenuSeed {
            id: "6",
            name: "Garlic Naan",
            description: "Fresh-baked flatbread with garlic and butter",
            price: 349,
            category: "Breads",
            spice_level: None,
            dietary_tags: &["Vegetarian", "Contains Dairy"],
            special_tags: &[],
            occasion_tags: &[],
            allergens: &["Gluten", "Dairy"],
            calories: 285,
            search_tags: &["naan", "bread", "garlic", "flatbread", "indian bread"],
        },
        MenuSeed {
            id: "7",
            name: "Dal Makhani",
            description: "Black lentils slow-cooked with butter and cream",
            price: 1199,
            category: "Main Course",
            spice_level: Some(SpiceLevel::Mild),
            dietary_tags: &["Vegetarian", "Contains Dairy"],
            special_tags: &["New Item"],
            occasion_tags: &["Comfort Food", "Family Meal"],
            allergens: &["Dairy"],
            calories: 340,
            search_tags: &["dal", "lentils", "curry", "vegetarian", "creamy", "protein"],
        },
        MenuSeed {
            id: "8",
            name: "Mango Lassi",
            description: "Refreshing yogurt drink with mango pulp",
            price: 449,
            category: "Beverages",
            spice_level: None,
            dietary_tags: &["Vegetarian", "Contains Dairy"],
            special_tags: &["Best Seller"],
            occasion_tags: &["Refreshing", "Summer"],
            allergens: &["Dairy"],
            calories: 180,
            search_tags: &["lassi", "mango", "drink", "beverage", "yogurt", "sweet"],
        },
        MenuSeed {
            id: "9",
            name: "Lamb Vindaloo",
            description: "Fiery Goan curry with tender lamb and vinegar-based sauce",
            price: 1799,
            category: "Main Course",
            spice_level: Some(SpiceLevel::Authentic),
            dietary_tags: &["Non-Veg", "Red Meat"],
            special_tags: &["Chef's Special"],
            occasion_tags: &["Special Occasion", "Adventurous"],
            allergens: &[],
            calories: 595,
            search_tags: &["vindaloo", "lamb", "spicy", "curry", "goan", "hot"],
        },
    ]
    .into_iter()
    .map(MenuItem::from)
    .collect()
}

/// Promotion codes accepted at checkout.
pub fn promotion_codes() -> Vec<PromotionCode> {
    vec![
        PromotionCode {
            code: "WELCOME20".to_string(),
            description: "Get 20% off on your first order".to_string(),
            kind: PromotionKind::PercentOff,
            value: Decimal::new(20, 2),
            min_order_subtotal: Some(Money::from_minor(1500)),
            valid_until: None,
        },
        PromotionCode {
            code: "FREESHIP".to_string(),
            description: "Free delivery on orders over £25".to_string(),
            kind: PromotionKind::FreeDelivery,
            value: Decimal::ZERO,
            min_order_subtotal: Some(Money::from_minor(2500)),
            valid_until: None,
        },
        PromotionCode {
            code: "WEEKEND15".to_string(),
            description: "Weekend special - 15% off all orders".to_string(),
            kind: PromotionKind::FlatPercentOff,
            value: Decimal::new(15, 2),
            min_order_subtotal: None,
            valid_until: NaiveDate::from_ymd_opt(2025, 11, 15),
        },
        PromotionCode {
            code: "SAVE10".to_string(),
            description: "10% off your order".to_string(),
            kind: PromotionKind::PercentOff,
            value: Decimal::new(10, 2),
            min_order_subtotal: None,
            valid_until: None,
        },
    ]
}

fn order_item(menu: &[MenuItem], id: &str, quantity: i64) -> Option<OrderItem> {
    menu.iter()
        .find(|m| m.id == id)
        .map(|m| OrderItem::from_menu_item(m, quantity))
}

/// The demo customer's order history.
pub fn past_orders() -> Vec<Order> {
    let menu = menu_items();
    let at = |h: u32, m: u32| Utc.with_ymd_and_hms(2024, 11, 10, h, m, 0).single();

    let mut messages = Vec::new();
    if let Some(timestamp) = at(14, 30) {
        messages.push(OrderMessage {
            id: "1".to_string(),
            sender: MessageSender::Customer,
            message: "Please add extra spice".to_string(),
            timestamp,
        });
    }
    if let Some(timestamp) = at(14, 32) {
        messages.push(OrderMessage {
            id: "2".to_string(),
            sender: MessageSender::Restaurant,
            message: "Sure! We will make it extra spicy for you.".to_string(),
            timestamp,
        });
    }

    let mut orders = Vec::new();
    if let Some(date) = NaiveDate::from_ymd_opt(2024, 11, 10) {
        orders.push(Order {
            id: "1".to_string(),
            order_number: "ORD-2024-001234".to_string(),
            restaurant_name: "Spice Garden".to_string(),
            date,
            total: Money::from_minor(4247),
            status: OrderStatus::Delivered,
            items: [("1", 2), ("6", 2)]
                .iter()
                .filter_map(|(id, qty)| order_item(&menu, id, *qty))
                .collect(),
            delivery_address: Some(DEMO_DELIVERY_ADDRESS.to_string()),
            messages,
        });
    }
    if let Some(date) = NaiveDate::from_ymd_opt(2024, 11, 9) {
        orders.push(Order {
            id: "2".to_string(),
            order_number: "ORD-2024-001235".to_string(),
            restaurant_name: "Pizza Perfetto".to_string(),
            date,
            total: Money::from_minor(2899),
            status: OrderStatus::Delivered,
            items: [("2", 1), ("4", 2)]
                .iter()
                .filter_map(|(id, qty)| order_item(&menu, id, *qty))
                .collect(),
            delivery_address: Some(DEMO_DELIVERY_ADDRESS.to_string()),
            messages: Vec::new(),
        });
    }
    orders
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_counts() {
        assert_eq!(restaurants().len(), 6);
        assert_eq!(menu_items().len(), 9);
        assert_eq!(promotion_codes().len(), 4);
        assert_eq!(past_orders().len(), 2);
    }

    #[test]
    fn test_slugs_are_unique() {
        let restaurants = restaurants();
        let mut slugs: Vec<&str> = restaurants.iter().map(|r| r.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), restaurants.len());
    }

    #[test]
    fn test_detailed_hours() {
        let restaurants = restaurants();
        let spice_garden = &restaurants[0];
        assert_eq!(spice_garden.detailed_hours.len(), 7);
        assert_eq!(spice_garden.detailed_hours[4].close, "11:00 PM");
        assert_eq!(spice_garden.detailed_hours[6].open, "12:00 PM");

        let sushi = &restaurants[2];
        assert!(sushi.detailed_hours[6].closed);
    }

    #[test]
    fn test_past_order_items_resolve() {
        let orders = past_orders();
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].messages.len(), 2);
        assert_eq!(orders[1].items[1].name, "Samosa (2 pcs)");
    }
}

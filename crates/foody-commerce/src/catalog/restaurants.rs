//! Restaurant directory built from TheMealDB `categories.php`.
//!
//! Every meal category is listed as one restaurant. Names and cover images
//! come from a fixed table, badges and delivery windows from the listing
//! position, and a "Sushi Master" entry closes the list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::mealdb::shorten_text;
use crate::error::CommerceError;

/// Characters of category description kept on a restaurant card.
pub const CARD_DESCRIPTION_LENGTH: usize = 80;

/// Category, restaurant name, Unsplash photo id.
const RESTAURANTS: &[(&str, &str, &str)] = &[
    ("Beef", "The Steakhouse", "photo-1558030006-450675393462"),
    ("Chicken", "Golden Grill", "photo-1544025162-d76694265947"),
    ("Dessert", "Sweet Treats Bakery", "photo-1559329007-40df8a9345d8"),
    ("Lamb", "Spice Garden", "photo-1552566626-52f8b828add9"),
    ("Miscellaneous", "The Fusion Kitchen", "photo-1414235077428-338989a2e8c0"),
    ("Pasta", "The Italian Kitchen", "photo-1517248135467-4c7edcad34c4"),
    ("Pork", "Dragon Palace", "photo-1559339352-11d035aa65de"),
    ("Seafood", "Ocean Fresh", "photo-1579871494447-9811cf80d66c"),
    ("Side", "Green Garden", "photo-1600891964092-4316c288032e"),
    ("Starter", "Appetizer House", "photo-1504674900247-0877df9cc836"),
    ("Vegan", "Vegan Vibes", "photo-1565299624946-b28f40a0ae38"),
    ("Vegetarian", "Veggie Delight", "photo-1600891964092-4316c288032e"),
    ("Breakfast", "Morning Cafe", "photo-1533089860892-a7c6f0a88666"),
    ("Goat", "Mediterranean Grill", "photo-1466978913421-dad2ebd01d17"),
];

const SUSHI_MASTER_PHOTO: &str = "photo-1553621042-f6e147245754";

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=600&q=80")
}

fn lookup(category: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    RESTAURANTS.iter().find(|(c, _, _)| *c == category)
}

/// Restaurant name for a meal category, `"<Category> House"` when unknown.
pub fn restaurant_name(category: &str) -> String {
    match lookup(category) {
        Some((_, name, _)) => (*name).to_string(),
        None => format!("{category} House"),
    }
}

/// Cover image for a meal category, `fallback` when unknown.
pub fn restaurant_image(category: &str, fallback: &str) -> String {
    match lookup(category) {
        Some((_, _, photo)) => unsplash(photo),
        None => fallback.to_string(),
    }
}

/// Delivery window shown on the card at `index`, e.g. `"15-25 min"`.
pub fn delivery_time(index: usize) -> String {
    let offset = (index * 5) % 20;
    format!("{}-{} min", 15 + offset, 25 + offset)
}

/// Rating shown on the card at `index`, between 4.0 and 4.9.
pub fn rating_for(index: usize) -> f32 {
    let tenths = 40 + ((index * 3 + 7) % 10) as u8;
    f32::from(tenths) / 10.0
}

/// Highlight badge on a restaurant card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "Most Visited")]
    MostVisited,
    Popular,
    Trending,
    #[serde(rename = "Top Rated")]
    TopRated,
    New,
    Premium,
}

impl Badge {
    pub const ALL: [Badge; 6] = [
        Badge::MostVisited,
        Badge::Popular,
        Badge::Trending,
        Badge::TopRated,
        Badge::New,
        Badge::Premium,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Badge::MostVisited => "Most Visited",
            Badge::Popular => "Popular",
            Badge::Trending => "Trending",
            Badge::TopRated => "Top Rated",
            Badge::New => "New",
            Badge::Premium => "Premium",
        }
    }

    /// Hex colour of the badge.
    pub fn color(&self) -> &'static str {
        match self {
            Badge::MostVisited => "#e74c3c",
            Badge::Popular => "#9b59b6",
            Badge::Trending => "#3498db",
            Badge::TopRated => "#f39c12",
            Badge::New => "#27ae60",
            Badge::Premium => "#8e44ad",
        }
    }

    /// Badge for the card at `index`. Badges repeat every eight cards and
    /// the last three of each run have none.
    pub fn for_index(index: usize) -> Option<Badge> {
        match index % 8 {
            0 => Some(Badge::MostVisited),
            1 => Some(Badge::Popular),
            2 => Some(Badge::Trending),
            3 => Some(Badge::TopRated),
            4 => Some(Badge::New),
            _ => None,
        }
    }
}

impl FromStr for Badge {
    type Err = ();

    /// Accepts the display name in any case, with spaces, `-` or `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Badge::ALL
            .into_iter()
            .find(|badge| badge.display_name().to_lowercase() == wanted)
            .ok_or(())
    }
}

/// Response body of `categories.php`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoriesResponse {
    pub categories: Option<Vec<CategorySummary>>,
}

/// One meal category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    #[serde(rename = "idCategory")]
    pub id: String,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb")]
    pub thumbnail: String,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

/// A restaurant card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    /// Position in the directory, starting at 1.
    pub id: u32,
    pub name: String,
    pub image: String,
    pub cuisine: String,
    pub rating: f32,
    pub delivery_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub description: String,
    /// Meal category the menu is built from.
    pub category: String,
}

impl Restaurant {
    fn from_category(index: usize, category: CategorySummary) -> Self {
        Self {
            id: index as u32 + 1,
            name: restaurant_name(&category.name),
            image: restaurant_image(&category.name, &category.thumbnail),
            cuisine: category.name.clone(),
            rating: rating_for(index),
            delivery_time: delivery_time(index),
            badge: Badge::for_index(index),
            description: shorten_text(category.description.as_deref(), CARD_DESCRIPTION_LENGTH),
            category: category.name,
        }
    }

    fn sushi_master(id: u32) -> Self {
        Self {
            id,
            name: "Sushi Master".to_string(),
            image: unsplash(SUSHI_MASTER_PHOTO),
            cuisine: "Seafood".to_string(),
            rating: 4.9,
            delivery_time: "30-40 min".to_string(),
            badge: Some(Badge::Premium),
            description: "Premium Japanese sushi and seafood specialties...".to_string(),
            category: "Seafood".to_string(),
        }
    }
}

/// Build the directory from a raw `categories.php` JSON body.
pub fn restaurants_from_json(body: &str) -> Result<Vec<Restaurant>, CommerceError> {
    let response: CategoriesResponse = serde_json::from_str(body)?;
    restaurants_from_categories(response)
}

/// Build the directory: one restaurant per category, then Sushi Master.
pub fn restaurants_from_categories(
    response: CategoriesResponse,
) -> Result<Vec<Restaurant>, CommerceError> {
    let categories = response
        .categories
        .ok_or_else(|| CommerceError::Catalog("no restaurants found".to_string()))?;

    let mut restaurants: Vec<Restaurant> = categories
        .into_iter()
        .enumerate()
        .map(|(index, category)| Restaurant::from_category(index, category))
        .collect();
    restaurants.push(Restaurant::sushi_master(restaurants.len() as u32 + 1));

    tracing::debug!(count = restaurants.len(), "Restaurant directory built");
    Ok(restaurants)
}

/// Search and facet filters for the directory. Empty filters match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    /// Case-insensitive text matched against name or cuisine.
    pub search: String,
    pub badges: Vec<Badge>,
    pub cuisines: Vec<String>,
}

impl RestaurantFilter {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn badge(mut self, badge: Badge) -> Self {
        self.badges.push(badge);
        self
    }

    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisines.push(cuisine.into());
        self
    }

    /// Whether `restaurant` passes every filter.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || restaurant.name.to_lowercase().contains(&search)
            || restaurant.cuisine.to_lowercase().contains(&search);

        let matches_badge = self.badges.is_empty()
            || restaurant
                .badge
                .is_some_and(|badge| self.badges.contains(&badge));

        let matches_cuisine = self.cuisines.is_empty()
            || self
                .cuisines
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(&restaurant.cuisine));

        matches_search && matches_badge && matches_cuisine
    }

    /// Restaurants that pass, in directory order.
    pub fn apply<'a>(&self, restaurants: &'a [Restaurant]) -> Vec<&'a Restaurant> {
        restaurants.iter().filter(|r| self.matches(r)).collect()
    }
}

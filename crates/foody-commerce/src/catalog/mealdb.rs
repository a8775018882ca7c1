//! TheMealDB `filter.php?c=<category>` and `lookup.php?i=<id>` payloads.
//!
//! The recipe catalog has no prices, so each dish gets a stable price derived
//! from its meal id: the same meal always costs the same.

use serde::{Deserialize, Serialize};

use crate::catalog::restaurants::restaurant_name;
use crate::catalog::{Menu, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Number of dishes shown per restaurant menu.
pub const MENU_SIZE: usize = 9;

/// Characters of cooking instructions kept in a meal description.
pub const MEAL_DESCRIPTION_LENGTH: usize = 100;

/// First `max` characters of `text` followed by `...`. Missing or empty
/// text gives an empty string.
pub fn shorten_text(text: Option<&str>, max: usize) -> String {
    match text {
        Some(text) if !text.is_empty() => {
            let mut short: String = text.chars().take(max).collect();
            short.push_str("...");
            short
        }
        _ => String::new(),
    }
}

/// Response body of `filter.php`. `meals` is `null` for unknown categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealDbResponse {
    pub meals: Option<Vec<MealSummary>>,
}

/// One dish in a `filter.php` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: String,
}

/// Price for a meal id: `(id mod 15) + 8` dollars and 99 cents, so
/// $8.99 through $22.99.
pub fn price_for_meal(meal_id: &str) -> Result<Money, CommerceError> {
    let id: u64 = meal_id
        .trim()
        .parse()
        .map_err(|_| CommerceError::Catalog(format!("meal id is not numeric: {meal_id:?}")))?;
    let dollars = (id % 15) as i64 + 8;
    Ok(Money::new(dollars * 100 + 99))
}

impl MealSummary {
    /// Convert into a priced product in `category`.
    pub fn into_product(self, category: &str) -> Result<Product, CommerceError> {
        let price = price_for_meal(&self.id)?;
        Ok(Product::new(ProductId::new(self.id), self.name, self.thumbnail, price)
            .with_category(category))
    }
}

impl Menu {
    /// Build a menu from a raw `filter.php` JSON body.
    pub fn from_mealdb_json(category: &str, body: &str) -> Result<Self, CommerceError> {
        let response: MealDbResponse = serde_json::from_str(body)?;
        Self::from_mealdb(category, response)
    }

    /// Build a menu from a parsed `filter.php` response, keeping the first
    /// [`MENU_SIZE`] dishes.
    pub fn from_mealdb(category: &str, response: MealDbResponse) -> Result<Self, CommerceError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(CommerceError::Catalog("category not found".to_string()));
        }

        let meals = response
            .meals
            .ok_or_else(|| CommerceError::NoMeals(category.to_string()))?;

        let items = meals
            .into_iter()
            .take(MENU_SIZE)
            .map(|meal| meal.into_product(category))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(category, items = items.len(), "Menu built from catalog payload");

        Ok(Self {
            category: Some(category.to_string()),
            restaurant_name: Some(restaurant_name(category)),
            items,
        })
    }
}

/// Response body of `lookup.php`. `meals` is `null` for unknown ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealLookupResponse {
    pub meals: Option<Vec<MealRecord>>,
}

/// Full meal record. Ingredient and measure columns are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: String,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
}

/// A single dish with its description, origin and price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealDetail {
    pub id: ProductId,
    pub name: String,
    /// Instructions cut to [`MEAL_DESCRIPTION_LENGTH`] characters.
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Cuisine of origin, e.g. "Japanese".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub price: Money,
}

impl MealDetail {
    /// Parse a raw `lookup.php` JSON body.
    pub fn from_lookup_json(body: &str) -> Result<Self, CommerceError> {
        let response: MealLookupResponse = serde_json::from_str(body)?;
        Self::from_lookup(response)
    }

    /// Take the first meal of a `lookup.php` response.
    pub fn from_lookup(response: MealLookupResponse) -> Result<Self, CommerceError> {
        let meal = response
            .meals
            .and_then(|meals| meals.into_iter().next())
            .ok_or_else(|| CommerceError::Catalog("meal not found".to_string()))?;

        Ok(Self {
            price: price_for_meal(&meal.id)?,
            description: shorten_text(meal.instructions.as_deref(), MEAL_DESCRIPTION_LENGTH),
            id: ProductId::new(meal.id),
            name: meal.name,
            image: meal.thumbnail,
            category: meal.category,
            area: meal.area,
        })
    }

    /// The dish as a cart product.
    pub fn to_product(&self) -> Product {
        let product = Product::new(self.id.clone(), &self.name, &self.image, self.price);
        match &self.category {
            Some(category) => product.with_category(category),
            None => product,
        }
    }
}

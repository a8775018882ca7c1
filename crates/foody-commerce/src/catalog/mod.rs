//! Product catalog module.
//!
//! Products are opaque value objects to the cart. The menu builder turns a
//! recipe-catalog payload into priced products, and the restaurant directory
//! presents each meal category as a restaurant.

mod mealdb;
mod product;
mod restaurants;

pub use mealdb::{
    price_for_meal, shorten_text, MealDbResponse, MealDetail, MealLookupResponse, MealRecord,
    MealSummary, MEAL_DESCRIPTION_LENGTH, MENU_SIZE,
};
pub use product::{Menu, Product, ProductLookup};
pub use restaurants::{
    delivery_time, rating_for, restaurant_image, restaurant_name, restaurants_from_categories,
    restaurants_from_json, Badge, CategoriesResponse, CategorySummary, Restaurant,
    RestaurantFilter, CARD_DESCRIPTION_LENGTH,
};

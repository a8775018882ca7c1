//! Commerce error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
///
/// Lookup misses on the cart (removing or updating an unknown product) are
/// not errors; those operations are no-ops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A submission is already in flight.
    #[error("An order is already being placed")]
    AlreadySubmitting,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// The checkout form has field errors.
    #[error("Checkout form has {count} invalid field(s)")]
    Validation { count: usize },

    /// The order gateway rejected the order.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),

    /// The order gateway did not answer in time.
    #[error("Order submission timed out after {0:?}")]
    SubmissionTimeout(Duration),

    /// A product was priced below zero.
    #[error("Invalid price for {product}: {price}")]
    InvalidPrice { product: String, price: String },

    /// Catalog payload could not be turned into products.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Catalog payload had no meals for the category.
    #[error("No meals found for category: {0}")]
    NoMeals(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

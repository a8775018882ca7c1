//! Product type and lookup.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product that can be put in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Stable product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image URL.
    pub image: String,
    /// Unit price.
    pub price: Money,
    /// Menu category (e.g. "Seafood").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Create a new product without a category.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        image: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            price,
            category: None,
        }
    }

    /// Create a product, rejecting negative prices.
    pub fn try_new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        image: impl Into<String>,
        price: Money,
    ) -> Result<Self, CommerceError> {
        let product = Self::new(id, name, image, price);
        product.validate()?;
        Ok(product)
    }

    /// Check that the price is not negative.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.price.is_negative() {
            return Err(CommerceError::InvalidPrice {
                product: self.id.to_string(),
                price: self.price.display(),
            });
        }
        Ok(())
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Source of products for the cart.
pub trait ProductLookup {
    /// Find a product by ID.
    fn find(&self, id: &ProductId) -> Option<&Product>;

    /// All products, in listing order.
    fn products(&self) -> &[Product];
}

/// An ordered list of products, e.g. one restaurant's menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    /// Category the menu was built from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Restaurant serving this menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    pub items: Vec<Product>,
}

impl Menu {
    pub fn new(items: Vec<Product>) -> Self {
        Self {
            category: None,
            restaurant_name: None,
            items,
        }
    }

    /// Build a menu, rejecting it if any product has a negative price.
    pub fn try_new(items: Vec<Product>) -> Result<Self, CommerceError> {
        items.iter().try_for_each(Product::validate)?;
        Ok(Self::new(items))
    }

    /// Set the restaurant the menu belongs to.
    pub fn with_restaurant_name(mut self, name: impl Into<String>) -> Self {
        self.restaurant_name = Some(name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ProductLookup for Menu {
    fn find(&self, id: &ProductId) -> Option<&Product> {
        self.items.iter().find(|p| &p.id == id)
    }

    fn products(&self) -> &[Product] {
        &self.items
    }
}

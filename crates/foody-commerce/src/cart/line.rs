//! Cart line items.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product in the cart with its quantity.
///
/// Lines are only created and changed by [`CartStore`](super::CartStore),
/// which keeps `quantity >= 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product ID, unique within the cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Image URL.
    pub image: String,
    /// Menu category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Quantity, at least 1.
    pub quantity: u32,
}

impl CartLine {
    pub(crate) fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * i64::from(self.quantity)
    }
}

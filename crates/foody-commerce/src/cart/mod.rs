//! Shopping cart module.
//!
//! Contains the cart store, its line items, and the pricing summary shared
//! by the cart page and the checkout page.

mod line;
mod store;
mod summary;

pub use line::CartLine;
pub use store::CartStore;
pub use summary::{OrderSummary, PricingPolicy};

//! Cart and checkout domain for the Foodylicious ordering app.
//!
//! - **Catalog**: Restaurant directory and priced menu items built from recipe-catalog payloads
//! - **Cart**: The cart store, line items, and order pricing
//! - **Checkout**: Form validation, order placement, and the checkout state machine
//! - **Notify**: Toast notifications emitted by cart and checkout
//!
//! # Example
//!
//! ```rust,ignore
//! use foody_commerce::prelude::*;
//!
//! let mut cart = CartStore::default();
//! cart.add_item(&Product::new("52772", "Teriyaki Chicken", "thumb.jpg", Money::new(1299)));
//!
//! let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
//! flow.set_field(Field::Name, "Asha Rao")?;
//! // ...
//! let order = flow.place_order(&mut cart, &SimulatedGateway::default()).await?;
//! println!("Total: {}", order.total());
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod notify;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    pub use crate::notify::{
        Notification, NotificationKind, Notifier, NullNotifier, RecordingNotifier,
        SharedNotifier,
    };

    // Catalog
    pub use crate::catalog::{Menu, Product, ProductLookup, Restaurant, RestaurantFilter};

    // Cart
    pub use crate::cart::{CartLine, CartStore, OrderSummary, PricingPolicy};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutForm, CheckoutOptions, CheckoutState, Field, FieldError,
        GatewayError, Navigator, Order, OrderConfirmation, OrderGateway, PaymentMethod,
        PendingOrder, Redirect, SimulatedGateway, ValidationErrors,
    };

    pub use crate::config::StoreConfig;
}

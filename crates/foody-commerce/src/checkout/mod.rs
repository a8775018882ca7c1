//! Checkout module.
//!
//! The checkout form, its validation, order placement, and the state machine
//! tying them to the cart.

mod flow;
mod form;
mod gateway;
mod navigation;
mod order;
pub mod validation;

pub use flow::{CheckoutFlow, CheckoutOptions, CheckoutState};
pub use form::{CheckoutForm, CustomerDetails, Field, PaymentMethod};
pub use gateway::{GatewayError, OrderGateway, SimulatedGateway};
pub use navigation::{Navigator, Redirect};
pub use order::{Order, OrderConfirmation, PendingOrder};
pub use validation::{is_valid_email, is_valid_mobile, validate, FieldError, ValidationErrors};

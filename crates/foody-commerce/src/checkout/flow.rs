//! Checkout flow state machine.
//!
//! ```text
//!            ┌──────────── errors ───────────┐
//!            ▼                               │
//! enter ─► Editing ─► Validating ─► Submitting ─► Success ─► (redirect)
//!   │        ▲                          │
//!   │        └──── SubmissionFailed ◄───┘
//!   └─► EmptyCart
//! ```
//!
//! `SubmissionFailed` is editable and a new submit retries.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::cart::{CartStore, OrderSummary, PricingPolicy};
use crate::checkout::validation::{self, ValidationErrors};
use crate::checkout::{
    CheckoutForm, Field, Navigator, Order, OrderConfirmation, OrderGateway, PaymentMethod,
    PendingOrder, Redirect,
};
use crate::notify::{Notification, SharedNotifier, DEFAULT_TOAST_DURATION};
use crate::CommerceError;

/// Where the checkout currently is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    /// Entered (or submitted) with nothing in the cart.
    EmptyCart,
    /// Collecting customer details.
    Editing,
    /// Checking the form.
    Validating,
    /// Waiting on the order gateway; submit is disabled.
    Submitting,
    /// The gateway failed; the form is editable and submit retries.
    SubmissionFailed { reason: String },
    /// Order placed.
    Success { order: Box<Order> },
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::EmptyCart => "empty_cart",
            CheckoutState::Editing => "editing",
            CheckoutState::Validating => "validating",
            CheckoutState::Submitting => "submitting",
            CheckoutState::SubmissionFailed { .. } => "submission_failed",
            CheckoutState::Success { .. } => "success",
        }
    }

    /// Whether the form accepts input.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            CheckoutState::Editing | CheckoutState::SubmissionFailed { .. }
        )
    }

    /// Terminal views: no further user-driven transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutState::EmptyCart | CheckoutState::Success { .. }
        )
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tunables for a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOptions {
    pub pricing: PricingPolicy,
    /// Longest wait for the order gateway.
    pub submission_timeout: Duration,
    /// Redirect scheduled after success.
    pub redirect: Redirect,
    pub toast_duration: Duration,
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self {
            pricing: PricingPolicy::default(),
            submission_timeout: Duration::from_secs(10),
            redirect: Redirect::default(),
            toast_duration: DEFAULT_TOAST_DURATION,
        }
    }
}

/// One visit to the checkout page.
pub struct CheckoutFlow {
    state: CheckoutState,
    form: CheckoutForm,
    errors: ValidationErrors,
    pending: Option<PendingOrder>,
    options: CheckoutOptions,
    notifier: SharedNotifier,
}

impl CheckoutFlow {
    /// Enter checkout for `cart`.
    ///
    /// An empty cart lands on the empty-cart view instead of the form.
    /// Notifications go to the cart's notifier.
    pub fn enter(cart: &CartStore, options: CheckoutOptions) -> Self {
        let state = if cart.is_empty() {
            CheckoutState::EmptyCart
        } else {
            CheckoutState::Editing
        };
        tracing::debug!(state = %state, items = cart.count(), "Checkout entered");
        Self {
            state,
            form: CheckoutForm::default(),
            errors: ValidationErrors::default(),
            pending: None,
            options,
            notifier: cart.notifier().clone(),
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Error message for one field.
    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors.message(field)
    }

    pub fn options(&self) -> &CheckoutOptions {
        &self.options
    }

    /// Pricing for the current cart, as shown beside the form.
    pub fn summary(&self, cart: &CartStore) -> OrderSummary {
        cart.summary(&self.options.pricing)
    }

    /// The placed order, once in `Success`.
    pub fn order(&self) -> Option<&Order> {
        match &self.state {
            CheckoutState::Success { order } => Some(order),
            _ => None,
        }
    }

    /// The scheduled redirect, once in `Success`.
    pub fn redirect(&self) -> Option<&Redirect> {
        self.order().map(|_| &self.options.redirect)
    }

    /// Whether the submit control is enabled.
    pub fn is_submit_enabled(&self) -> bool {
        self.state.is_editable()
    }

    /// Update one field. Clears that field's error and no other.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), CommerceError> {
        self.ensure_editable("editing")?;
        self.form.set(field, value);
        self.errors.clear(field);
        Ok(())
    }

    /// Choose the payment method.
    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        self.ensure_editable("editing")?;
        self.form.payment_method = method;
        Ok(())
    }

    /// Validate and, if everything checks out, move to `Submitting`.
    ///
    /// Returns the order snapshot to hand to a gateway. On field errors the
    /// flow goes back to `Editing` with the errors recorded.
    pub fn begin_submission(&mut self, cart: &CartStore) -> Result<PendingOrder, CommerceError> {
        match self.state {
            CheckoutState::Submitting => return Err(CommerceError::AlreadySubmitting),
            CheckoutState::Editing | CheckoutState::SubmissionFailed { .. } => {}
            _ => return Err(self.invalid_transition("submitting")),
        }

        if cart.is_empty() {
            self.state = CheckoutState::EmptyCart;
            return Err(CommerceError::EmptyCart);
        }

        if let Some(line) = cart.lines().iter().find(|line| line.price.is_negative()) {
            tracing::warn!(product = %line.id, price = %line.price, "Refusing negative price");
            return Err(CommerceError::InvalidPrice {
                product: line.id.to_string(),
                price: line.price.display(),
            });
        }

        self.state = CheckoutState::Validating;
        self.errors = validation::validate(&self.form);
        if !self.errors.is_empty() {
            let count = self.errors.len();
            tracing::debug!(count, "Checkout form rejected");
            self.state = CheckoutState::Editing;
            self.toast(Notification::error("Please fill all required fields correctly"));
            return Err(CommerceError::Validation { count });
        }

        let pending = PendingOrder {
            lines: cart.lines().to_vec(),
            summary: self.summary(cart),
            customer: self.form.customer_details(),
            payment_method: self.form.payment_method,
        };
        self.pending = Some(pending.clone());
        self.state = CheckoutState::Submitting;
        tracing::info!(
            items = pending.summary.item_count,
            total = %pending.summary.total,
            payment = pending.payment_method.as_str(),
            "Submitting order"
        );
        Ok(pending)
    }

    /// Record a successful placement: clears the cart and enters `Success`.
    pub fn complete_submission(
        &mut self,
        cart: &mut CartStore,
        confirmation: OrderConfirmation,
    ) -> Result<Order, CommerceError> {
        if self.state != CheckoutState::Submitting {
            return Err(self.invalid_transition("success"));
        }
        let pending = self
            .pending
            .take()
            .ok_or_else(|| self.invalid_transition("success"))?;

        let order = Order::new(pending, confirmation);
        cart.clear();
        self.form = CheckoutForm::default();
        self.errors = ValidationErrors::default();
        tracing::info!(order_id = %order.id, total = %order.total(), "Order placed");
        self.state = CheckoutState::Success {
            order: Box::new(order.clone()),
        };
        Ok(order)
    }

    /// Record a failed placement. The cart is left as it was.
    pub fn fail_submission(&mut self, reason: impl Into<String>) -> Result<(), CommerceError> {
        if self.state != CheckoutState::Submitting {
            return Err(self.invalid_transition("submission_failed"));
        }
        let reason = reason.into();
        tracing::warn!(reason = %reason, "Order submission failed");
        self.pending = None;
        self.toast(Notification::error(format!(
            "Could not place your order: {reason}. Please try again."
        )));
        self.state = CheckoutState::SubmissionFailed { reason };
        Ok(())
    }

    /// Validate, submit through `gateway`, and settle the outcome.
    ///
    /// The cart stays borrowed for the whole submission, so it cannot change
    /// while the order is in flight.
    pub async fn place_order(
        &mut self,
        cart: &mut CartStore,
        gateway: &dyn OrderGateway,
    ) -> Result<Order, CommerceError> {
        let pending = self.begin_submission(cart)?;
        let timeout = self.options.submission_timeout;

        match tokio::time::timeout(timeout, gateway.submit(&pending)).await {
            Ok(Ok(confirmation)) => self.complete_submission(cart, confirmation),
            Ok(Err(e)) => {
                let reason = e.to_string();
                self.fail_submission(reason.clone())?;
                Err(CommerceError::SubmissionFailed(reason))
            }
            Err(_) => {
                self.fail_submission(format!("no response after {timeout:?}"))?;
                Err(CommerceError::SubmissionTimeout(timeout))
            }
        }
    }

    /// Wait out the success redirect, then navigate. Not cancellable.
    ///
    /// Returns false if there is no redirect to follow.
    pub async fn follow_redirect(&self, navigator: &dyn Navigator) -> bool {
        let Some(redirect) = self.redirect() else {
            return false;
        };
        tokio::time::sleep(redirect.after).await;
        tracing::debug!(route = %redirect.route, "Redirecting after checkout");
        navigator.navigate(&redirect.route);
        true
    }

    fn ensure_editable(&self, to: &str) -> Result<(), CommerceError> {
        if self.state.is_editable() {
            Ok(())
        } else {
            Err(self.invalid_transition(to))
        }
    }

    fn invalid_transition(&self, to: &str) -> CommerceError {
        CommerceError::InvalidTransition {
            from: self.state.as_str().to_string(),
            to: to.to_string(),
        }
    }

    fn toast(&self, notification: Notification) {
        self.notifier
            .notify(notification.with_duration(self.options.toast_duration));
    }
}

impl fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("state", &self.state)
            .field("form", &self.form)
            .field("errors", &self.errors)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::checkout::{GatewayError, SimulatedGateway};
    use crate::ids::OrderId;
    use crate::money::Money;
    use crate::notify::RecordingNotifier;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    fn cart_with_items(notifier: SharedNotifier) -> CartStore {
        let mut cart = CartStore::new(notifier);
        let curry = Product::new("1", "Butter Chicken", "curry.jpg", Money::new(1000));
        let naan = Product::new("2", "Garlic Naan", "naan.jpg", Money::new(500));
        cart.add_item(&curry);
        cart.add_item(&curry);
        cart.add_item(&naan);
        cart
    }

    fn fill(flow: &mut CheckoutFlow) {
        flow.set_field(Field::Name, "Asha Rao").unwrap();
        flow.set_field(Field::Phone, "9876543210").unwrap();
        flow.set_field(Field::Email, "asha@example.com").unwrap();
        flow.set_field(Field::Address, "12 MG Road, Bengaluru").unwrap();
    }

    fn confirmation() -> OrderConfirmation {
        OrderConfirmation {
            order_id: OrderId::new("order-42"),
            placed_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &str) {
            self.routes.lock().unwrap().push(route.to_string());
        }
    }

    struct StalledGateway;

    #[async_trait]
    impl OrderGateway for StalledGateway {
        async fn submit(&self, _order: &PendingOrder) -> Result<OrderConfirmation, GatewayError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(GatewayError::Unavailable("never".to_string()))
        }
    }

    #[test]
    fn test_empty_cart_enters_empty_view() {
        let cart = CartStore::default();
        let flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        assert_eq!(flow.state(), &CheckoutState::EmptyCart);
        assert!(flow.state().is_terminal());
        assert!(!flow.is_submit_enabled());
    }

    #[test]
    fn test_non_empty_cart_enters_editing() {
        let cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        assert_eq!(flow.state(), &CheckoutState::Editing);
        assert!(flow.is_submit_enabled());
        assert_eq!(flow.summary(&cart).total.amount_cents, 2925);
    }

    #[test]
    fn test_validation_failure_returns_to_editing() {
        let recorder = Arc::new(RecordingNotifier::new());
        let cart = cart_with_items(recorder.clone());
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());

        let err = flow.begin_submission(&cart).unwrap_err();
        assert_eq!(err, CommerceError::Validation { count: 4 });
        assert_eq!(flow.state(), &CheckoutState::Editing);
        assert_eq!(flow.errors().len(), 4);
        assert_eq!(
            recorder.last().unwrap().message,
            "Please fill all required fields correctly"
        );
    }

    #[test]
    fn test_editing_clears_only_that_field() {
        let cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        let _ = flow.begin_submission(&cart);

        flow.set_field(Field::Name, "Asha").unwrap();
        assert!(flow.error_for(Field::Name).is_none());
        assert_eq!(flow.errors().len(), 3);
        assert_eq!(flow.error_for(Field::Phone), Some("Phone number is required"));
    }

    #[test]
    fn test_begin_submission_snapshots_order() {
        let cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);
        flow.select_payment(PaymentMethod::Card).unwrap();

        let pending = flow.begin_submission(&cart).unwrap();
        assert_eq!(flow.state(), &CheckoutState::Submitting);
        assert!(!flow.is_submit_enabled());
        assert_eq!(pending.lines.len(), 2);
        assert_eq!(pending.summary.total.amount_cents, 2925);
        assert_eq!(pending.payment_method, PaymentMethod::Card);
        assert_eq!(pending.customer.name, "Asha Rao");
    }

    #[test]
    fn test_double_submission_is_rejected() {
        let cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);

        flow.begin_submission(&cart).unwrap();
        assert_eq!(
            flow.begin_submission(&cart).unwrap_err(),
            CommerceError::AlreadySubmitting
        );
        assert!(flow.set_field(Field::Name, "Other").is_err());
    }

    #[test]
    fn test_complete_submission_clears_cart() {
        let recorder = Arc::new(RecordingNotifier::new());
        let mut cart = cart_with_items(recorder.clone());
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);
        flow.begin_submission(&cart).unwrap();

        let order = flow.complete_submission(&mut cart, confirmation()).unwrap();
        assert!(cart.is_empty());
        assert_eq!(order.total().amount_cents, 2925);
        assert_eq!(order.item_count(), 3);
        assert_eq!(flow.order().map(|o| o.id.as_str()), Some("order-42"));
        assert_eq!(flow.redirect(), Some(&Redirect::default()));
        assert_eq!(recorder.last().unwrap().message, "Cart cleared!");
    }

    #[test]
    fn test_receipt_ignores_later_cart_changes() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);
        flow.begin_submission(&cart).unwrap();
        flow.complete_submission(&mut cart, confirmation()).unwrap();

        cart.add_item(&Product::new("9", "Kulfi", "kulfi.jpg", Money::new(700)));
        assert_eq!(flow.order().unwrap().total().amount_cents, 2925);
    }

    #[test]
    fn test_fail_submission_is_retryable() {
        let recorder = Arc::new(RecordingNotifier::new());
        let mut cart = cart_with_items(recorder.clone());
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);
        flow.begin_submission(&cart).unwrap();

        flow.fail_submission("network down").unwrap();
        assert_eq!(
            flow.state(),
            &CheckoutState::SubmissionFailed {
                reason: "network down".to_string()
            }
        );
        assert!(flow.is_submit_enabled());
        assert_eq!(cart.count(), 3);
        assert!(recorder.last().unwrap().message.contains("network down"));

        flow.begin_submission(&cart).unwrap();
        flow.complete_submission(&mut cart, confirmation()).unwrap();
        assert!(flow.order().is_some());
    }

    #[test]
    fn test_submit_with_emptied_cart() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);
        cart.clear();

        assert_eq!(flow.begin_submission(&cart).unwrap_err(), CommerceError::EmptyCart);
        assert_eq!(flow.state(), &CheckoutState::EmptyCart);
    }

    #[test]
    fn test_negative_price_blocks_submission() {
        let mut cart = CartStore::new(Arc::new(RecordingNotifier::new()));
        cart.add_item(&Product::new("n", "Neg", "", Money::new(-500)));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);

        let err = flow.begin_submission(&cart).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPrice { .. }));
        assert_eq!(flow.state(), &CheckoutState::Editing);
        assert!(flow.order().is_none());
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_transitions_out_of_order_are_rejected() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());

        assert!(matches!(
            flow.complete_submission(&mut cart, confirmation()),
            Err(CommerceError::InvalidTransition { .. })
        ));
        assert!(matches!(
            flow.fail_submission("nope"),
            Err(CommerceError::InvalidTransition { .. })
        ));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_success_is_terminal() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);
        flow.begin_submission(&cart).unwrap();
        flow.complete_submission(&mut cart, confirmation()).unwrap();

        assert!(flow.state().is_terminal());
        assert!(flow.set_field(Field::Name, "Again").is_err());
        assert!(matches!(
            flow.begin_submission(&cart),
            Err(CommerceError::InvalidTransition { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_through_gateway() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);

        let gateway = SimulatedGateway::new(Duration::from_secs(2));
        let order = flow.place_order(&mut cart, &gateway).await.unwrap();
        assert_eq!(order.total().amount_cents, 2925);
        assert!(cart.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_gateway_failure() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);

        let gateway = SimulatedGateway::new(Duration::from_millis(100)).failing(1);
        let err = flow.place_order(&mut cart, &gateway).await.unwrap_err();
        assert!(matches!(err, CommerceError::SubmissionFailed(_)));
        assert!(matches!(
            flow.state(),
            CheckoutState::SubmissionFailed { .. }
        ));
        assert_eq!(cart.count(), 3);

        // Retry succeeds.
        flow.place_order(&mut cart, &gateway).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_timeout() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let options = CheckoutOptions {
            submission_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let mut flow = CheckoutFlow::enter(&cart, options);
        fill(&mut flow);

        let err = flow.place_order(&mut cart, &StalledGateway).await.unwrap_err();
        assert_eq!(err, CommerceError::SubmissionTimeout(Duration::from_secs(5)));
        assert!(flow.is_submit_enabled());
        assert_eq!(cart.count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sub_second_timeout_reason() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let options = CheckoutOptions {
            submission_timeout: Duration::from_millis(500),
            ..Default::default()
        };
        let mut flow = CheckoutFlow::enter(&cart, options);
        fill(&mut flow);

        let err = flow.place_order(&mut cart, &StalledGateway).await.unwrap_err();
        assert_eq!(err, CommerceError::SubmissionTimeout(Duration::from_millis(500)));
        assert_eq!(
            flow.state(),
            &CheckoutState::SubmissionFailed {
                reason: "no response after 500ms".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_follow_redirect_navigates_home() {
        let mut cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        fill(&mut flow);
        flow.place_order(&mut cart, &SimulatedGateway::default())
            .await
            .unwrap();

        let navigator = RecordingNavigator::default();
        let start = tokio::time::Instant::now();
        assert!(flow.follow_redirect(&navigator).await);
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert_eq!(*navigator.routes.lock().unwrap(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn test_no_redirect_before_success() {
        let cart = cart_with_items(Arc::new(RecordingNotifier::new()));
        let flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
        let navigator = RecordingNavigator::default();
        assert!(!flow.follow_redirect(&navigator).await);
        assert!(navigator.routes.lock().unwrap().is_empty());
    }
}

//! The cart store: single owner of the cart's line items.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::cart::{CartLine, OrderSummary, PricingPolicy};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use crate::notify::{Notification, NullNotifier, SharedNotifier, DEFAULT_TOAST_DURATION};

/// Cart state and the only way to change it.
///
/// Invariants held after every operation:
/// - at most one line per product id
/// - every line has `quantity >= 1`
/// - lines stay in insertion order
pub struct CartStore {
    lines: Vec<CartLine>,
    notifier: SharedNotifier,
    toast_duration: Duration,
}

impl CartStore {
    /// Create an empty cart that reports to `notifier`.
    pub fn new(notifier: SharedNotifier) -> Self {
        Self {
            lines: Vec::new(),
            notifier,
            toast_duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Set how long cart toasts stay visible.
    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line or appends a new one. Returns the line's
    /// quantity afterwards.
    pub fn add_item(&mut self, product: &Product) -> u32 {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            let quantity = existing.quantity;
            tracing::debug!(product_id = %product.id, quantity, "Cart line incremented");
            self.toast(
                Notification::success(format!("Added another \"{}\" to cart!", product.name))
                    .with_icon("🛒"),
            );
            return quantity;
        }

        self.lines.push(CartLine::from_product(product));
        tracing::debug!(product_id = %product.id, quantity = 1, "Cart line added");
        self.toast(
            Notification::success(format!("\"{}\" added to cart!", product.name)).with_icon("🛒"),
        );
        1
    }

    /// Remove the line for `id`, if any.
    ///
    /// Unknown ids are a no-op and produce no notification.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| &l.id == id)?;
        let removed = self.lines.remove(index);
        tracing::debug!(product_id = %id, "Cart line removed");
        self.toast(
            Notification::error(format!("\"{}\" removed from cart", removed.name)).with_icon("🗑️"),
        );
        Some(removed)
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity below 1 removes the line. Unknown ids are a no-op.
    /// Returns true if the cart changed.
    pub fn update_quantity(&mut self, id: &ProductId, new_quantity: i64) -> bool {
        if new_quantity < 1 {
            return self.remove_item(id).is_some();
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|l| &l.id == id) {
            Some(line) => {
                line.quantity = quantity;
                tracing::debug!(product_id = %id, quantity, "Cart line quantity set");
                true
            }
            None => false,
        }
    }

    /// The cart page's "+" control.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        let Some(quantity) = self.get(id).map(|l| l.quantity) else {
            return false;
        };
        self.update_quantity(id, i64::from(quantity) + 1)
    }

    /// The cart page's "−" control; removes the line when it reaches zero.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(quantity) = self.get(id).map(|l| l.quantity) else {
            return false;
        };
        self.update_quantity(id, i64::from(quantity) - 1)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        let dropped = self.lines.len();
        self.lines.clear();
        tracing::debug!(lines = dropped, "Cart cleared");
        self.toast(Notification::success("Cart cleared!").with_icon("🧹"));
    }

    /// Total number of items (sum of quantities).
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Pricing breakdown under `policy`.
    pub fn summary(&self, policy: &PricingPolicy) -> OrderSummary {
        policy.summarize(self.total(), self.count())
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Line total for a product.
    pub fn line_total(&self, id: &ProductId) -> Option<Money> {
        self.get(id).map(CartLine::line_total)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn notifier(&self) -> &SharedNotifier {
        &self.notifier
    }

    fn toast(&self, notification: Notification) {
        self.notifier
            .notify(notification.with_duration(self.toast_duration));
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Arc::new(NullNotifier))
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("toast_duration", &self.toast_duration)
            .finish_non_exhaustive()
    }
}

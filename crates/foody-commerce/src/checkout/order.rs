//! Order snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, OrderSummary};
use crate::checkout::{CustomerDetails, PaymentMethod};
use crate::ids::OrderId;
use crate::money::Money;

/// What gets sent to the order gateway.
///
/// Captured when submission starts, so later cart changes never alter the
/// receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOrder {
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
    pub customer: CustomerDetails,
    pub payment_method: PaymentMethod,
}

/// Gateway acknowledgement of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
}

/// A placed order, shown on the confirmation screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerDetails,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub fn new(pending: PendingOrder, confirmation: OrderConfirmation) -> Self {
        Self {
            id: confirmation.order_id,
            customer: pending.customer,
            payment_method: pending.payment_method,
            lines: pending.lines,
            summary: pending.summary,
            placed_at: confirmation.placed_at,
        }
    }

    /// Amount charged.
    pub fn total(&self) -> Money {
        self.summary.total
    }

    /// Total item count.
    pub fn item_count(&self) -> u64 {
        self.summary.item_count
    }
}

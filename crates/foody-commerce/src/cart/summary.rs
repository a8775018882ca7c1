//! Order pricing shared by the cart page and the checkout page.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::Money;

/// Tax and delivery rules.
///
/// Both summary views price through the same policy. Delivery is charged
/// only when there is something to deliver (`subtotal > 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Tax rate in basis points (500 = 5%).
    pub tax_rate_bps: i64,
    /// Flat delivery fee for a non-empty order.
    pub delivery_fee: Money,
}

impl PricingPolicy {
    /// Build a policy from a decimal tax rate (0.05 = 5%).
    pub fn new(tax_rate: f64, delivery_fee: Money) -> Result<Self, CommerceError> {
        if !tax_rate.is_finite() || !(0.0..=1.0).contains(&tax_rate) {
            return Err(CommerceError::Config(format!(
                "tax rate must be between 0 and 1, got {tax_rate}"
            )));
        }
        if delivery_fee.is_negative() {
            return Err(CommerceError::Config(format!(
                "delivery fee cannot be negative, got {delivery_fee}"
            )));
        }
        Ok(Self {
            tax_rate_bps: (tax_rate * 10_000.0).round() as i64,
            delivery_fee,
        })
    }

    /// Tax rate as a decimal fraction.
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate_bps as f64 / 10_000.0
    }

    /// Delivery fee owed for `subtotal`.
    pub fn delivery_fee_for(&self, subtotal: Money) -> Money {
        if subtotal.is_positive() {
            self.delivery_fee
        } else {
            Money::zero()
        }
    }

    /// Full breakdown for a cart subtotal.
    pub fn summarize(&self, subtotal: Money, item_count: u64) -> OrderSummary {
        let tax = subtotal.apply_basis_points(self.tax_rate_bps);
        let delivery_fee = self.delivery_fee_for(subtotal);
        OrderSummary {
            item_count,
            subtotal,
            tax,
            delivery_fee,
            total: subtotal + tax + delivery_fee,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate_bps: 500,
            delivery_fee: Money::new(300),
        }
    }
}

/// Priced totals for a cart or an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Number of items (sum of quantities).
    pub item_count: u64,
    /// Sum of line totals.
    pub subtotal: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    /// subtotal + tax + delivery_fee
    pub total: Money,
}

//! Order placement.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::checkout::{OrderConfirmation, PendingOrder};
use crate::ids::OrderId;

/// Errors reported by an order gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The order was refused.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The gateway could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Places orders.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit(&self, order: &PendingOrder) -> Result<OrderConfirmation, GatewayError>;
}

/// Stand-in gateway: waits a fixed delay, then accepts the order.
///
/// Can be told to fail a number of times first, to exercise the retry path.
#[derive(Debug)]
pub struct SimulatedGateway {
    delay: Duration,
    failures_remaining: AtomicU32,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failures_remaining: AtomicU32::new(0),
        }
    }

    /// Fail the next `count` submissions.
    pub fn failing(self, count: u32) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl OrderGateway for SimulatedGateway {
    async fn submit(&self, order: &PendingOrder) -> Result<OrderConfirmation, GatewayError> {
        tokio::time::sleep(self.delay).await;

        let failed = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            tracing::warn!(total = %order.summary.total, "Simulated order placement failure");
            return Err(GatewayError::Unavailable(
                "the kitchen is not accepting orders right now".to_string(),
            ));
        }

        Ok(OrderConfirmation {
            order_id: OrderId::generate(),
            placed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PricingPolicy;
    use crate::checkout::{CustomerDetails, PaymentMethod};
    use crate::money::Money;

    fn pending() -> PendingOrder {
        PendingOrder {
            lines: Vec::new(),
            summary: PricingPolicy::default().summarize(Money::new(1000), 1),
            customer: CustomerDetails {
                name: "Asha".to_string(),
                phone: "9876543210".to_string(),
                email: "asha@example.com".to_string(),
                address: "12 MG Road, Bengaluru".to_string(),
            },
            payment_method: PaymentMethod::Cod,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_waits_then_accepts() {
        let gateway = SimulatedGateway::new(Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        let confirmation = gateway.submit(&pending()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(!confirmation.order_id.as_str().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_fails_requested_times() {
        let gateway = SimulatedGateway::new(Duration::from_millis(10)).failing(2);
        assert!(matches!(
            gateway.submit(&pending()).await,
            Err(GatewayError::Unavailable(_))
        ));
        assert!(gateway.submit(&pending()).await.is_err());
        assert!(gateway.submit(&pending()).await.is_ok());
    }
}

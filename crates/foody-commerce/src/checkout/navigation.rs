//! Navigation after checkout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Route changes requested by the checkout. Fire-and-forget.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// A timed redirect scheduled on the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub route: String,
    pub after: Duration,
}

impl Default for Redirect {
    fn default() -> Self {
        Self {
            route: "/".to_string(),
            after: Duration::from_secs(3),
        }
    }
}

//! Store configuration.
//!
//! Plain serde structs; every field has a default so a partial file (or none
//! at all) is valid. Reading the file is left to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cart::PricingPolicy;
use crate::checkout::{CheckoutOptions, Redirect};
use crate::error::CommerceError;
use crate::money::Money;

/// Top-level store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl StoreConfig {
    /// Pricing rules, validated.
    pub fn pricing_policy(&self) -> Result<PricingPolicy, CommerceError> {
        PricingPolicy::new(
            self.pricing.tax_rate,
            Money::new(self.pricing.delivery_fee_cents),
        )
    }

    /// Options for a checkout flow.
    pub fn checkout_options(&self) -> Result<CheckoutOptions, CommerceError> {
        if self.checkout.submission_timeout_ms == 0 {
            return Err(CommerceError::Config(
                "submission_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if !self.checkout.home_route.starts_with('/') {
            return Err(CommerceError::Config(format!(
                "home_route must start with '/', got {:?}",
                self.checkout.home_route
            )));
        }

        Ok(CheckoutOptions {
            pricing: self.pricing_policy()?,
            submission_timeout: Duration::from_millis(self.checkout.submission_timeout_ms),
            redirect: Redirect {
                route: self.checkout.home_route.clone(),
                after: Duration::from_millis(self.checkout.redirect_delay_ms),
            },
            toast_duration: self.toast_duration(),
        })
    }

    /// Delay used by the simulated order gateway.
    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.submission_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.duration_ms)
    }
}

/// Tax and delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Decimal tax rate (0.05 = 5%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Flat delivery fee in cents.
    #[serde(default = "default_delivery_fee_cents")]
    pub delivery_fee_cents: i64,
}

fn default_tax_rate() -> f64 {
    0.05
}

fn default_delivery_fee_cents() -> i64 {
    300
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            delivery_fee_cents: default_delivery_fee_cents(),
        }
    }
}

/// Submission and redirect timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_submission_delay_ms")]
    pub submission_delay_ms: u64,

    #[serde(default = "default_submission_timeout_ms")]
    pub submission_timeout_ms: u64,

    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    /// Route to navigate to after a placed order.
    #[serde(default = "default_home_route")]
    pub home_route: String,
}

fn default_submission_delay_ms() -> u64 {
    2000
}

fn default_submission_timeout_ms() -> u64 {
    10_000
}

fn default_redirect_delay_ms() -> u64 {
    3000
}

fn default_home_route() -> String {
    "/".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            submission_delay_ms: default_submission_delay_ms(),
            submission_timeout_ms: default_submission_timeout_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
            home_route: default_home_route(),
        }
    }
}

/// Toast display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_duration_ms() -> u64 {
    2000
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_checkout_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.pricing_policy().unwrap(), PricingPolicy::default());
        assert_eq!(config.checkout_options().unwrap(), CheckoutOptions::default());
        assert_eq!(config.submission_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"pricing": {"delivery_fee_cents": 500}}"#).unwrap();
        assert_eq!(config.pricing.delivery_fee_cents, 500);
        assert_eq!(config.pricing.tax_rate, 0.05);
        assert_eq!(config.checkout.home_route, "/");
        assert_eq!(config.notifications.duration_ms, 2000);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = StoreConfig::default();
        config.pricing.tax_rate = 1.5;
        assert!(matches!(config.pricing_policy(), Err(CommerceError::Config(_))));

        let mut config = StoreConfig::default();
        config.checkout.submission_timeout_ms = 0;
        assert!(config.checkout_options().is_err());

        let mut config = StoreConfig::default();
        config.checkout.home_route = "home".to_string();
        assert!(config.checkout_options().is_err());
    }

    #[test]
    fn test_checkout_options_from_config() {
        let mut config = StoreConfig::default();
        config.checkout.redirect_delay_ms = 500;
        config.checkout.home_route = "/menu".to_string();
        let options = config.checkout_options().unwrap();
        assert_eq!(options.redirect.route, "/menu");
        assert_eq!(options.redirect.after, Duration::from_millis(500));
    }
}

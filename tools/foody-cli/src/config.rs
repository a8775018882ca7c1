//! Config file loading.
//!
//! Store settings live in `foody.toml` (or `.foody.toml` / `foody.json`);
//! the schema itself is [`StoreConfig`].

use std::path::Path;

use anyhow::{Context, Result};
use foody_commerce::config::StoreConfig;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["foody.toml", ".foody.toml", "foody.json"];

/// Load config from a file. `.json` files are JSON, anything else is TOML.
pub fn load(path: &Path) -> Result<StoreConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}

/// Save config to a file in the format its extension implies.
pub fn save(config: &StoreConfig, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a commented default `foody.toml`.
pub fn generate_default_config() -> String {
    r#"# Foodylicious store configuration

[pricing]
# Decimal tax rate applied to the subtotal (0.05 = 5%)
tax_rate = 0.05
# Flat delivery fee in cents, charged on non-empty orders
delivery_fee_cents = 300

[checkout]
# Simulated order placement time
submission_delay_ms = 2000
# Give up on order placement after this long
submission_timeout_ms = 10000
# Wait on the confirmation screen before going home
redirect_delay_ms = 3000
home_route = "/"

[notifications]
duration_ms = 2000
"#
    .to_string()
}

//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use foody_commerce::config::StoreConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{self, generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("tax_rate", &config.pricing.tax_rate.to_string());
    ctx.output
        .kv("delivery_fee_cents", &config.pricing.delivery_fee_cents.to_string());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output
        .kv("submission_delay_ms", &config.checkout.submission_delay_ms.to_string());
    ctx.output.kv(
        "submission_timeout_ms",
        &config.checkout.submission_timeout_ms.to_string(),
    );
    ctx.output
        .kv("redirect_delay_ms", &config.checkout.redirect_delay_ms.to_string());
    ctx.output.kv("home_route", &config.checkout.home_route);

    ctx.output.info("");
    ctx.output.info("[notifications]");
    ctx.output
        .kv("duration_ms", &config.notifications.duration_ms.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.config_path.clone() else {
        bail!("No config file found. Run `foody config init` to create one.");
    };

    let mut store = config::load(&path)?;
    set_config_value(&mut store, key, value)?;

    // Reject values the store would refuse at checkout.
    store.checkout_options()?;

    config::save(&store, &path)?;
    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let config = &ctx.config;
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = config.checkout_options() {
        bail!("{}", e);
    }

    if config.checkout.submission_delay_ms >= config.checkout.submission_timeout_ms {
        warnings.push(format!(
            "checkout.submission_delay_ms ({}) is not below submission_timeout_ms ({}); every order will time out",
            config.checkout.submission_delay_ms, config.checkout.submission_timeout_ms
        ));
    }

    if config.notifications.duration_ms == 0 {
        warnings.push("notifications.duration_ms is 0; toasts will not be visible".to_string());
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }
    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &StoreConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["pricing", "tax_rate"] => Ok(config.pricing.tax_rate.to_string()),
        ["pricing", "delivery_fee_cents"] => Ok(config.pricing.delivery_fee_cents.to_string()),
        ["checkout", "submission_delay_ms"] => Ok(config.checkout.submission_delay_ms.to_string()),
        ["checkout", "submission_timeout_ms"] => {
            Ok(config.checkout.submission_timeout_ms.to_string())
        }
        ["checkout", "redirect_delay_ms"] => Ok(config.checkout.redirect_delay_ms.to_string()),
        ["checkout", "home_route"] => Ok(config.checkout.home_route.clone()),
        ["notifications", "duration_ms"] => Ok(config.notifications.duration_ms.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut StoreConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["pricing", "tax_rate"] => config.pricing.tax_rate = value.parse()?,
        ["pricing", "delivery_fee_cents"] => config.pricing.delivery_fee_cents = value.parse()?,
        ["checkout", "submission_delay_ms"] => config.checkout.submission_delay_ms = value.parse()?,
        ["checkout", "submission_timeout_ms"] => {
            config.checkout.submission_timeout_ms = value.parse()?
        }
        ["checkout", "redirect_delay_ms"] => config.checkout.redirect_delay_ms = value.parse()?,
        ["checkout", "home_route"] => config.checkout.home_route = value.to_string(),
        ["notifications", "duration_ms"] => config.notifications.duration_ms = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_values() {
        let mut config = StoreConfig::default();
        assert_eq!(get_config_value(&config, "pricing.tax_rate").unwrap(), "0.05");

        set_config_value(&mut config, "checkout.home_route", "/menu").unwrap();
        set_config_value(&mut config, "pricing.delivery_fee_cents", "450").unwrap();
        assert_eq!(get_config_value(&config, "checkout.home_route").unwrap(), "/menu");
        assert_eq!(config.pricing.delivery_fee_cents, 450);
    }

    #[test]
    fn test_unknown_and_malformed_keys() {
        let mut config = StoreConfig::default();
        assert!(get_config_value(&config, "pricing").is_err());
        assert!(set_config_value(&mut config, "checkout.redirect_delay_ms", "soon").is_err());
        assert!(set_config_value(&mut config, "nope.nope", "1").is_err());
    }
}

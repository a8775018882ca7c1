//! CLI command implementations.

pub mod checkout;
pub mod config;
pub mod dish;
pub mod menu;
pub mod quote;
pub mod restaurants;

use std::io::Read;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use foody_commerce::cart::CartStore;
use foody_commerce::catalog::{Badge, Menu, ProductLookup};
use foody_commerce::checkout::Navigator;
use foody_commerce::ids::ProductId;
use foody_commerce::notify::{Notification, Notifier};

use crate::context::Context;
use crate::output::Output;

/// Menu payload shipped with the CLI, a `filter.php?c=Seafood` response.
const BUNDLED_MENU: &str = include_str!("../../fixtures/seafood.json");
const BUNDLED_CATEGORY: &str = "Seafood";

/// Restaurant directory shipped with the CLI, a `categories.php` response.
const BUNDLED_CATEGORIES: &str = include_str!("../../fixtures/categories.json");

/// Dish shipped with the CLI, a `lookup.php?i=52959` response.
const BUNDLED_MEAL: &str = include_str!("../../fixtures/meal-52959.json");

/// Largest quantity accepted for one item on the command line.
pub const MAX_QUANTITY: u32 = 99;

/// Read a catalog payload from `file` ("-" for stdin), or fall back to the
/// bundled copy.
fn read_payload(file: Option<&str>, bundled: &str, what: &str, ctx: &Context) -> Result<String> {
    match file {
        Some("-") => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .with_context(|| format!("Failed to read {what} from stdin"))?;
            Ok(body)
        }
        Some(path) => {
            let path = ctx.resolve_path(path);
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {what} file: {}", path.display()))
        }
        None => Ok(bundled.to_string()),
    }
}

/// Where the menu comes from.
#[derive(Args, Clone)]
pub struct MenuSource {
    /// Menu category.
    #[arg(short = 'k', long, default_value = BUNDLED_CATEGORY)]
    pub category: String,

    /// Restaurant serving the menu. Defaults to the category's restaurant.
    #[arg(short, long)]
    pub restaurant: Option<String>,

    /// MealDB `filter.php` JSON to read the menu from ("-" for stdin).
    /// Defaults to the bundled seafood menu.
    #[arg(short, long)]
    pub file: Option<String>,
}

impl MenuSource {
    /// Read and price the menu.
    pub fn load(&self, ctx: &Context) -> Result<Menu> {
        if self.file.is_none() && !self.category.eq_ignore_ascii_case(BUNDLED_CATEGORY) {
            bail!(
                "No bundled menu for '{}'. Pass --file with a MealDB payload.",
                self.category
            );
        }
        let body = read_payload(self.file.as_deref(), BUNDLED_MENU, "menu", ctx)?;

        let mut menu = Menu::from_mealdb_json(&self.category, &body)?;
        if let Some(restaurant) = &self.restaurant {
            menu = menu.with_restaurant_name(restaurant);
        }
        ctx.output
            .debug(&format!("Loaded {} dishes for {}", menu.len(), self.category));
        Ok(menu)
    }
}

/// One cart entry on the command line: `ID` or `ID:QTY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub id: ProductId,
    pub quantity: u32,
}

impl std::str::FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once(':') {
            Some((id, qty)) => {
                let qty: u32 = qty
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid quantity in '{s}'"))?;
                (id, qty)
            }
            None => (s, 1),
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(format!("missing product id in '{s}'"));
        }
        if quantity == 0 {
            return Err(format!("quantity must be at least 1 in '{s}'"));
        }
        if quantity > MAX_QUANTITY {
            return Err(format!("quantity must be at most {MAX_QUANTITY} in '{s}'"));
        }
        Ok(Self {
            id: ProductId::new(id),
            quantity,
        })
    }
}

/// Fill `cart` from item specs: one `add_item` per spec, then the
/// quantity is raised to cover the rest.
pub fn fill_cart(cart: &mut CartStore, menu: &Menu, items: &[ItemSpec]) -> Result<()> {
    for item in items {
        let Some(product) = menu.find(&item.id) else {
            bail!("'{}' is not on the {} menu", item.id, menu_name(menu));
        };
        let quantity = cart.add_item(product);
        if item.quantity > 1 {
            cart.update_quantity(
                &item.id,
                i64::from(quantity) + i64::from(item.quantity) - 1,
            );
        }
    }
    Ok(())
}

fn menu_name(menu: &Menu) -> &str {
    menu.restaurant_name
        .as_deref()
        .or(menu.category.as_deref())
        .unwrap_or("current")
}

/// Shows cart and checkout toasts on the terminal.
pub struct TerminalNotifier {
    output: Output,
}

impl TerminalNotifier {
    pub fn shared(output: &Output) -> Arc<Self> {
        Arc::new(Self {
            output: output.clone(),
        })
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        self.output.toast(&notification);
    }
}

/// Prints route changes instead of navigating.
pub struct TerminalNavigator {
    output: Output,
}

impl TerminalNavigator {
    pub fn new(output: &Output) -> Self {
        Self {
            output: output.clone(),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!(route, "Navigate");
        self.output.info(&format!("Navigating to {route}"));
    }
}

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    #[command(flatten)]
    pub source: MenuSource,
}

/// Arguments for the restaurants command.
#[derive(Args)]
pub struct RestaurantsArgs {
    /// Only restaurants whose name or cuisine contains this text.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only restaurants with this badge (repeatable), e.g. "top-rated".
    #[arg(short, long = "badge", value_parser = parse_badge)]
    pub badges: Vec<Badge>,

    /// Only restaurants serving this cuisine (repeatable).
    #[arg(short = 'k', long = "cuisine")]
    pub cuisines: Vec<String>,

    /// MealDB `categories.php` JSON to read ("-" for stdin).
    /// Defaults to the bundled directory.
    #[arg(short, long)]
    pub file: Option<String>,
}

fn parse_badge(s: &str) -> Result<Badge, String> {
    s.parse().map_err(|_| {
        let known: Vec<&str> = Badge::ALL.iter().map(|b| b.display_name()).collect();
        format!("unknown badge '{s}' (expected one of: {})", known.join(", "))
    })
}

/// Arguments for the dish command.
#[derive(Args)]
pub struct DishArgs {
    /// MealDB `lookup.php` JSON to read ("-" for stdin).
    /// Defaults to the bundled salmon dish.
    #[arg(short, long)]
    pub file: Option<String>,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Items to add, as ID or ID:QTY.
    #[arg(required = true)]
    pub items: Vec<ItemSpec>,

    #[command(flatten)]
    pub source: MenuSource,

    /// Hide cart notifications.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Items to add, as ID or ID:QTY.
    pub items: Vec<ItemSpec>,

    #[command(flatten)]
    pub source: MenuSource,

    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Payment method (cod or card).
    #[arg(long, default_value = "cod")]
    pub payment: String,

    /// Prompt for missing or invalid details.
    #[arg(short, long)]
    pub interactive: bool,

    /// Make the first N order submissions fail.
    #[arg(long, default_value = "0")]
    pub fail: u32,

    /// Retry a failed submission up to N times.
    #[arg(long, default_value = "0")]
    pub retries: u32,

    /// Don't wait for the redirect after the order is placed.
    #[arg(long)]
    pub no_redirect: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

//! Foodylicious CLI - browse the menu, price a cart, and check out.
//!
//! Commands:
//! - `foody restaurants` - Browse and filter restaurants
//! - `foody menu` - List a category's menu
//! - `foody dish` - Show one dish in detail
//! - `foody quote` - Price a cart
//! - `foody checkout` - Place an order
//! - `foody config` - Manage store configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::{CheckoutArgs, ConfigArgs, DishArgs, MenuArgs, QuoteArgs, RestaurantsArgs};

/// Foodylicious - order food from the terminal
#[derive(Parser)]
#[command(name = "foody")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse restaurants, with search and badge/cuisine filters
    Restaurants(RestaurantsArgs),

    /// List the menu for a category
    Menu(MenuArgs),

    /// Show a dish's description, origin and price
    Dish(DishArgs),

    /// Build a cart and show its price breakdown
    Quote(QuoteArgs),

    /// Check out a cart and place the order
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Restaurants(args) => commands::restaurants::run(args, &ctx).await,
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Dish(args) => commands::dish::run(args, &ctx).await,
        Commands::Quote(args) => commands::quote::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, filtered by `FOODY_LOG`.
fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "foody=debug,foody_commerce=debug"
    } else {
        "foody=warn,foody_commerce=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("FOODY_LOG")
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

//! Price a cart without checking out.

use std::sync::Arc;

use anyhow::Result;
use foody_commerce::cart::CartStore;
use foody_commerce::notify::{NullNotifier, SharedNotifier};
use serde_json::json;

use super::{fill_cart, QuoteArgs, TerminalNotifier};
use crate::context::Context;

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let menu = args.source.load(ctx)?;
    let policy = ctx.config.pricing_policy()?;

    let notifier: SharedNotifier = if args.quiet {
        Arc::new(NullNotifier)
    } else {
        TerminalNotifier::shared(&ctx.output)
    };
    let mut cart = CartStore::new(notifier).with_toast_duration(ctx.config.toast_duration());
    fill_cart(&mut cart, &menu, &args.items)?;

    let summary = cart.summary(&policy);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "lines": cart.lines(),
            "summary": summary,
        }));
        return Ok(());
    }

    ctx.output.header("Your Cart");
    let widths = [36, 4, 10];
    for line in cart.lines() {
        let qty = format!("x{}", line.quantity);
        let total = line.line_total().display();
        ctx.output.table_row(&[&line.name, &qty, &total], &widths);
    }
    ctx.output.info("");
    ctx.output.summary(&summary, policy.tax_rate());

    Ok(())
}

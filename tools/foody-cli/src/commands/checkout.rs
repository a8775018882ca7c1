//! Check out a cart and place the order.

use anyhow::{anyhow, bail, Result};
use dialoguer::{Confirm, Input, Select};
use foody_commerce::cart::CartStore;
use foody_commerce::checkout::{
    CheckoutFlow, CheckoutState, Field, Order, PaymentMethod, SimulatedGateway,
};
use foody_commerce::CommerceError;

use super::{fill_cart, CheckoutArgs, TerminalNavigator, TerminalNotifier};
use crate::context::Context;
use crate::output::format_secs;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let options = ctx.config.checkout_options()?;
    let interactive = args.interactive && ctx.output.is_interactive();
    if args.interactive && !interactive {
        ctx.output.warn("Not a terminal, ignoring --interactive");
    }

    let menu = args.source.load(ctx)?;
    let mut cart = CartStore::new(TerminalNotifier::shared(&ctx.output))
        .with_toast_duration(options.toast_duration);
    fill_cart(&mut cart, &menu, &args.items)?;

    let mut flow = CheckoutFlow::enter(&cart, options);

    if *flow.state() == CheckoutState::EmptyCart {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({ "state": flow.state().as_str() }));
        } else {
            ctx.output.header("Your cart is empty");
            ctx.output.info("Add some delicious items to your cart before checking out.");
            ctx.output.list_item("foody menu");
            ctx.output.list_item("foody checkout <ID>[:QTY]...");
        }
        return Ok(());
    }

    ctx.output.header("Order Summary");
    for line in cart.lines() {
        ctx.output.kv(
            &format!("{} x{}", line.name, line.quantity),
            &line.line_total().display(),
        );
    }
    ctx.output.summary(&flow.summary(&cart), flow.options().pricing.tax_rate());

    for (field, value) in [
        (Field::Name, &args.name),
        (Field::Phone, &args.phone),
        (Field::Email, &args.email),
        (Field::Address, &args.address),
    ] {
        if let Some(value) = value {
            flow.set_field(field, value.as_str())?;
        }
    }

    let payment: PaymentMethod = args
        .payment
        .parse()
        .map_err(|_| anyhow!("Unknown payment method '{}'. Use cod or card.", args.payment))?;
    flow.select_payment(payment)?;

    if interactive {
        prompt_missing(&mut flow)?;
    }

    let gateway = SimulatedGateway::new(ctx.config.submission_delay()).failing(args.fail);
    let mut retries_left = args.retries;

    let order = loop {
        if let Some(notice) = flow.form().payment_method.notice() {
            ctx.output.warn(notice);
        }

        let spinner = ctx.output.spinner("Placing Order...");
        let result = flow.place_order(&mut cart, &gateway).await;
        spinner.finish_and_clear();

        match result {
            Ok(order) => break order,
            Err(CommerceError::Validation { count }) => {
                for (field, message) in flow.errors().messages() {
                    ctx.output.warn(&format!("{}: {}", field.label(), message));
                }
                if !interactive {
                    bail!("Checkout form has {} invalid field(s)", count);
                }
                prompt_invalid(&mut flow)?;
            }
            Err(e @ (CommerceError::SubmissionFailed(_) | CommerceError::SubmissionTimeout(_))) => {
                let retry = if retries_left > 0 {
                    retries_left -= 1;
                    ctx.output.info("Retrying...");
                    true
                } else if interactive {
                    Confirm::new()
                        .with_prompt("Try placing the order again?")
                        .default(true)
                        .interact()?
                } else {
                    false
                };
                if !retry {
                    return Err(e.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    };

    print_confirmation(&order, ctx);

    if let Some(redirect) = flow.redirect() {
        if args.no_redirect {
            ctx.output.debug(&format!("Skipping redirect to {}", redirect.route));
        } else {
            ctx.output.info(&format!(
                "Redirecting to {} in {}...",
                redirect.route,
                format_secs(redirect.after)
            ));
            flow.follow_redirect(&TerminalNavigator::new(&ctx.output)).await;
        }
    }

    Ok(())
}

fn print_confirmation(order: &Order, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.header("Order Placed Successfully!");
    ctx.output.success("Thank you for your order. Your delicious food is on its way!");
    ctx.output.kv("Order", &order.id.reference());
    ctx.output.kv("Placed", &order.placed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    ctx.output.kv("Deliver to", &order.customer.name);
    ctx.output.kv("Address", &order.customer.address);
    ctx.output.kv("Payment", order.payment_method.display_name());
    ctx.output.kv("Items", &order.item_count().to_string());
    ctx.output.kv("Total", &order.total().display());
}

/// Ask for every field that is still blank, then the payment method.
fn prompt_missing(flow: &mut CheckoutFlow) -> Result<()> {
    for field in Field::ALL {
        if flow.form().get(field).trim().is_empty() {
            prompt_field(flow, field)?;
        }
    }

    let methods = [PaymentMethod::Cod, PaymentMethod::Card];
    let labels: Vec<&str> = methods.iter().map(|m| m.display_name()).collect();
    let current = methods
        .iter()
        .position(|m| *m == flow.form().payment_method)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Payment Method")
        .items(&labels)
        .default(current)
        .interact()?;
    flow.select_payment(methods[choice])?;
    Ok(())
}

/// Ask again for the fields the last validation rejected.
fn prompt_invalid(flow: &mut CheckoutFlow) -> Result<()> {
    let fields: Vec<Field> = flow.errors().fields().collect();
    for field in fields {
        prompt_field(flow, field)?;
    }
    Ok(())
}

fn prompt_field(flow: &mut CheckoutFlow, field: Field) -> Result<()> {
    let value: String = Input::new()
        .with_prompt(field.label())
        .with_initial_text(flow.form().get(field))
        .allow_empty(true)
        .interact_text()?;
    flow.set_field(field, value)?;
    Ok(())
}

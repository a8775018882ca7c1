//! List a category's menu.

use anyhow::Result;

use super::MenuArgs;
use crate::context::Context;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let menu = args.source.load(ctx)?;

    if ctx.output.is_json() {
        ctx.output.json(&menu);
        return Ok(());
    }

    let title = match &menu.restaurant_name {
        Some(restaurant) => format!("{} ({}) Menu", restaurant, args.source.category),
        None => format!("{} Menu", args.source.category),
    };
    ctx.output.header(&title);
    let widths = [8, 44, 8];
    ctx.output.table_row(&["ID", "Dish", "Price"], &widths);
    for product in &menu.items {
        let price = product.price.display();
        ctx.output
            .table_row(&[product.id.as_str(), &product.name, &price], &widths);
    }

    ctx.output.info("");
    ctx.output
        .info("Add dishes with `foody quote <ID>[:QTY]...` or go straight to `foody checkout`.");

    Ok(())
}

//! Show one dish in detail.

use anyhow::Result;
use foody_commerce::catalog::MealDetail;

use super::{read_payload, DishArgs, BUNDLED_MEAL};
use crate::context::Context;

/// Run the dish command.
pub async fn run(args: DishArgs, ctx: &Context) -> Result<()> {
    let body = read_payload(args.file.as_deref(), BUNDLED_MEAL, "dish", ctx)?;
    let dish = MealDetail::from_lookup_json(&body)?;

    if ctx.output.is_json() {
        ctx.output.json(&dish);
        return Ok(());
    }

    ctx.output.header(&dish.name);
    ctx.output.kv("ID", dish.id.as_str());
    ctx.output.kv("Price", &dish.price.display());
    if let Some(category) = &dish.category {
        ctx.output.kv("Category", category);
    }
    if let Some(area) = &dish.area {
        ctx.output.kv("Cuisine", area);
    }
    if !dish.description.is_empty() {
        ctx.output.kv("About", &dish.description);
    }

    ctx.output.info("");
    ctx.output
        .info(&format!("Add it with `foody quote {}` or `foody checkout {}`.", dish.id, dish.id));

    Ok(())
}

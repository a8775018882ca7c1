//! Browse the restaurant directory.

use anyhow::Result;
use foody_commerce::catalog::{restaurants_from_json, RestaurantFilter};

use super::{read_payload, RestaurantsArgs, BUNDLED_CATEGORIES};
use crate::context::Context;

/// Run the restaurants command.
pub async fn run(args: RestaurantsArgs, ctx: &Context) -> Result<()> {
    let body = read_payload(args.file.as_deref(), BUNDLED_CATEGORIES, "restaurants", ctx)?;
    let restaurants = restaurants_from_json(&body)?;

    let filter = RestaurantFilter {
        search: args.search,
        badges: args.badges,
        cuisines: args.cuisines,
    };
    let shown = filter.apply(&restaurants);
    ctx.output.debug(&format!(
        "{} of {} restaurants match",
        shown.len(),
        restaurants.len()
    ));

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header("Restaurants");
    if shown.is_empty() {
        ctx.output.warn("No restaurants found");
        ctx.output.info("Try adjusting your search or filters.");
        return Ok(());
    }

    let widths = [3, 22, 14, 6, 10, 12];
    ctx.output.table_row(
        &["#", "Restaurant", "Cuisine", "Rating", "Delivery", "Badge"],
        &widths,
    );
    for restaurant in &shown {
        let id = restaurant.id.to_string();
        let rating = format!("{:.1}", restaurant.rating);
        let badge = restaurant.badge.map(|b| b.display_name()).unwrap_or("");
        ctx.output.table_row(
            &[
                id.as_str(),
                &restaurant.name,
                &restaurant.cuisine,
                &rating,
                &restaurant.delivery_time,
                badge,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info("Open a menu with `foody menu --category <CUISINE> --restaurant <NAME>`.");

    Ok(())
}

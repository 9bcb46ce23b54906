//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use storefront_commerce::cart::{CartState, OrderSummary};
use storefront_commerce::{Money, ProductId};

use super::{find_product, stock_limited_quantity, CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(ctx),
        CartCommand::Add { id, quantity } => add_to_cart(&id, quantity, ctx),
        CartCommand::Remove { id } => remove_from_cart(&id, ctx),
        CartCommand::Inc { id } => change_quantity(&id, Step::Up, ctx),
        CartCommand::Dec { id } => change_quantity(&id, Step::Down, ctx),
        CartCommand::Clear { yes } => clear_cart(yes, ctx),
    }
}

fn show_cart(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let cart = ctx.cart(&store);
    print_cart(cart.state(), ctx)
}

/// Print the cart with its order summary.
fn print_cart(state: &CartState, ctx: &Context) -> Result<()> {
    let summary = OrderSummary::calculate(state, &ctx.config.pricing)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cart": state, "summary": summary }));
        return Ok(());
    }

    ctx.output.header("Shopping Cart");

    if state.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Run `storefront products list` to browse products.");
        return Ok(());
    }

    let widths = [6, 36, 5, 10, 10];
    ctx.output.table_row(&["ID", "TITLE", "QTY", "PRICE", "TOTAL"], &widths);
    for item in state.items() {
        let line_total = item.line_total()?;
        ctx.output.table_row(
            &[
                &item.id.to_string(),
                &crate::output::truncate(&item.title, widths[1]),
                &item.quantity.to_string(),
                &item.price.to_string(),
                &line_total.to_string(),
            ],
            &widths,
        );
    }

    ctx.output.header("Order Summary");
    ctx.output.kv(
        &format!("Subtotal ({} items)", summary.item_count),
        &summary.subtotal.to_string(),
    );
    let shipping = if summary.has_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.to_string()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &summary.tax.to_string());
    ctx.output.kv("Total", &summary.grand_total.to_string());

    if !summary.has_free_shipping() {
        let needed = ctx
            .config
            .pricing
            .free_shipping_threshold
            .amount_cents
            .saturating_sub(summary.subtotal.amount_cents)
            .saturating_add(1);
        ctx.output.info(&format!(
            "Add {} more for free shipping.",
            Money::new(needed)
        ));
    }

    Ok(())
}

fn add_to_cart(id: &str, requested: i64, ctx: &Context) -> Result<()> {
    if requested <= 0 {
        bail!("Quantity must be at least 1");
    }

    let catalog = ctx.catalog()?;
    let product = find_product(&catalog, id)?;
    let quantity = stock_limited_quantity(&product, requested)?;
    if quantity < requested {
        ctx.output.warn(&format!(
            "Only {} of {} in stock; adding {}.",
            product.stock, product.title, quantity
        ));
    }

    let store = ctx.open_store()?;
    let mut cart = ctx.cart(&store);
    cart.add_item(&product, quantity)?;

    if ctx.output.is_json() {
        ctx.output.json(cart.state());
        return Ok(());
    }

    ctx.output.success(&format!(
        "Added {} × {} to cart (total {})",
        quantity,
        product.title,
        cart.state().total_amount()
    ));
    Ok(())
}

fn remove_from_cart(id: &str, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let mut cart = ctx.cart(&store);
    let id = ProductId::parse(id);

    let removed = cart.remove_item(&id)?;

    if ctx.output.is_json() {
        ctx.output.json(cart.state());
    } else if removed {
        ctx.output.success(&format!("Removed {} from cart", id));
    } else {
        ctx.output.info(&format!("{} is not in the cart", id));
    }
    Ok(())
}

enum Step {
    Up,
    Down,
}

fn change_quantity(id: &str, step: Step, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let mut cart = ctx.cart(&store);
    let id = ProductId::parse(id);

    if !cart.state().contains(&id) {
        bail!("{} is not in the cart", id);
    }

    let changed = match step {
        Step::Up => cart.increment_quantity(&id)?,
        Step::Down => cart.decrement_quantity(&id)?,
    };

    if ctx.output.is_json() {
        ctx.output.json(cart.state());
        return Ok(());
    }

    let quantity = cart.state().get(&id).map_or(0, |item| item.quantity);
    if changed {
        ctx.output.success(&format!(
            "{} quantity is now {} (total {})",
            id,
            quantity,
            cart.state().total_amount()
        ));
    } else {
        ctx.output.info(&format!(
            "{} quantity stays at {}; use `storefront cart remove {}` to remove it",
            id, quantity, id
        ));
    }
    Ok(())
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let mut cart = ctx.cart(&store);

    if !yes && !ctx.output.is_json() && !cart.state().is_empty() {
        let units = cart.state().item_count()?;
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", units))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cart left unchanged.");
            return Ok(());
        }
    }

    cart.clear_cart()?;

    if ctx.output.is_json() {
        ctx.output.json(cart.state());
    } else {
        ctx.output.success("Cart cleared");
    }
    Ok(())
}

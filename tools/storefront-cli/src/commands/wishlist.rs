//! Wishlist commands.

use anyhow::{bail, Result};
use serde_json::json;
use storefront_commerce::catalog::CatalogService;
use storefront_commerce::wishlist::WishlistToggle;
use storefront_commerce::ProductId;

use super::{find_product, stock_limited_quantity, WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(WishlistCommand::Show) {
        WishlistCommand::Show => show_wishlist(ctx),
        WishlistCommand::Toggle { id } => toggle(&id, ctx),
        WishlistCommand::Remove { id } => remove(&id, ctx),
        WishlistCommand::AddToCart { id } => add_to_cart(&id, ctx),
    }
}

fn show_wishlist(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let items = ctx.wishlist(&store).items()?;

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("Wishlist");
    if items.is_empty() {
        ctx.output.info("Your wishlist is empty.");
        return Ok(());
    }
    ctx.output.product_table(&items);
    Ok(())
}

fn toggle(id: &str, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let wishlist = ctx.wishlist(&store);

    // Saved entries can be unsaved even if the catalog no longer has them.
    let product = match wishlist.get(&ProductId::parse(id))? {
        Some(saved) => saved,
        None => find_product(&ctx.catalog()?, id)?,
    };

    let outcome = wishlist.toggle(&product)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": product.id, "result": outcome }));
        return Ok(());
    }

    let message = match outcome {
        WishlistToggle::Added => format!("Saved {} to wishlist", product.title),
        WishlistToggle::Removed => format!("Removed {} from wishlist", product.title),
    };
    ctx.output.success(&message);
    Ok(())
}

fn remove(id: &str, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let id = ProductId::parse(id);
    let removed = ctx.wishlist(&store).remove(&id)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": id, "removed": removed }));
    } else if removed {
        ctx.output.success(&format!("Removed {} from wishlist", id));
    } else {
        ctx.output.info(&format!("{} is not in the wishlist", id));
    }
    Ok(())
}

fn add_to_cart(id: &str, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let wishlist = ctx.wishlist(&store);
    let id = ProductId::parse(id);

    let Some(saved) = wishlist.get(&id)? else {
        bail!("{} is not in the wishlist", id);
    };

    // Stock comes from the catalog when it still lists the product.
    let product = ctx.catalog()?.product(&id)?.unwrap_or(saved);
    let quantity = stock_limited_quantity(&product, 1)?;

    let mut cart = ctx.cart(&store);
    cart.add_item(&product, quantity)?;

    if ctx.output.is_json() {
        ctx.output.json(cart.state());
        return Ok(());
    }

    ctx.output.success(&format!(
        "Added {} to cart (total {})",
        product.title,
        cart.state().total_amount()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;

    #[test]
    fn test_add_to_cart_keeps_wishlist_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "").unwrap();
        let ctx = Context::load(path.to_str(), Output::new(true)).unwrap();

        toggle("2", &ctx).unwrap();
        add_to_cart("2", &ctx).unwrap();
        add_to_cart("2", &ctx).unwrap();

        let store = ctx.open_store().unwrap();
        let id = ProductId::from(2);
        assert!(ctx.wishlist(&store).contains(&id).unwrap());
        assert_eq!(ctx.cart(&store).state().get(&id).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_to_cart_needs_saved_product() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "").unwrap();
        let ctx = Context::load(path.to_str(), Output::new(true)).unwrap();

        assert!(add_to_cart("2", &ctx).is_err());
    }
}

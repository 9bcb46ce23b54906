//! Catalog browsing commands.

use anyhow::Result;
use serde_json::json;
use storefront_commerce::catalog::{
    CatalogPage, CatalogProduct, CatalogQuery, CatalogService, PageRequest,
};
use storefront_commerce::search::{ProductFilter, SortOption};

use super::{find_product, ListArgs, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List(args) => list_products(&args, ctx),
        ProductsCommand::Search { query, sort } => search_products(&query, &sort, ctx),
        ProductsCommand::Show { id } => show_product(&id, ctx),
        ProductsCommand::Recent => recently_viewed(ctx),
        ProductsCommand::Categories => list_categories(ctx),
    }
}

fn list_products(args: &ListArgs, ctx: &Context) -> Result<()> {
    let filter = ProductFilter::from_params(
        args.category.as_deref(),
        args.brand.as_deref(),
        args.price.as_deref(),
        args.rating.as_deref(),
    )?;
    let sort: SortOption = args.sort.parse()?;

    // A single category can be narrowed by the catalog itself.
    let everything = PageRequest::new(0, 0);
    let query = match filter.categories.as_slice() {
        [slug] => CatalogQuery::category(slug.as_str(), everything),
        _ => CatalogQuery::all(everything),
    };
    tracing::debug!(path = %query.path(), sort = %sort, "listing products");

    let catalog = ctx.catalog()?;
    let mut products = filter.apply(catalog.products(&query)?.products);
    sort.sort(&mut products);

    let limit = args.limit.unwrap_or(ctx.config.catalog.page_size);
    let page = paginate(products, PageRequest::new(limit, args.skip));

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", sort.display_name()));
    if page.products.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    ctx.output.product_table(&page.products);
    ctx.output.info(&format!(
        "Showing {}-{} of {}",
        page.skip.saturating_add(1),
        page.end(),
        page.total
    ));
    if let Some(next) = page.next_page() {
        ctx.output
            .info(&format!("Next page: --skip {} --limit {}", next.skip, next.limit));
    }
    Ok(())
}

/// Cut one window out of an already filtered and sorted listing.
fn paginate(products: Vec<CatalogProduct>, window: PageRequest) -> CatalogPage {
    let total = products.len() as u64;
    let take = if window.limit == 0 {
        usize::MAX
    } else {
        window.limit as usize
    };
    CatalogPage {
        products: products
            .into_iter()
            .skip(window.skip as usize)
            .take(take)
            .collect(),
        total,
        skip: window.skip,
        limit: window.limit,
    }
}

fn search_products(text: &str, sort: &str, ctx: &Context) -> Result<()> {
    let sort: SortOption = sort.parse()?;
    let query = CatalogQuery::search(text);
    tracing::debug!(path = %query.path(), "searching products");

    let mut products = ctx.catalog()?.products(&query)?.products;
    sort.sort(&mut products);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Results for \"{}\"", text));
    if products.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }
    ctx.output.product_table(&products);
    Ok(())
}

fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let product = find_product(&ctx.catalog()?, id)?;

    let store = ctx.open_store()?;
    ctx.recently_viewed(&store).record(&product)?;
    let in_cart = ctx
        .cart(&store)
        .state()
        .get(&product.id)
        .map_or(0, |item| item.quantity);
    let wishlisted = ctx.wishlist(&store).contains(&product.id)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "inCart": in_cart,
            "wishlisted": wishlisted,
        }));
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", &product.id.to_string());
    if let Some(brand) = &product.brand {
        ctx.output.kv("Brand", brand);
    }
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &product.price.to_string());
    if product.discount_percentage > 0.0 {
        ctx.output
            .kv("Discount", &format!("{:.2}%", product.discount_percentage));
    }
    ctx.output.kv("Rating", &format!("{:.2} / 5", product.rating));
    ctx.output.kv("Stock", &stock_badge(product.stock));
    if in_cart > 0 {
        ctx.output.kv("In cart", &in_cart.to_string());
    }
    if wishlisted {
        ctx.output.kv("Wishlist", "saved");
    }
    if !product.description.is_empty() {
        ctx.output.info(&product.description);
    }
    Ok(())
}

fn recently_viewed(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let items = ctx.recently_viewed(&store).items()?;

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("Recently Viewed");
    if items.is_empty() {
        ctx.output
            .info("Nothing yet. Run `storefront products show <id>` to view a product.");
        return Ok(());
    }
    ctx.output.product_table(&items);
    Ok(())
}

fn list_categories(ctx: &Context) -> Result<()> {
    let categories = ctx.catalog()?.categories()?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output
            .list_item(&format!("{} ({})", category.name, category.slug));
    }
    Ok(())
}

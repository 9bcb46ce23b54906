//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod products;
pub mod wishlist;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use storefront_commerce::catalog::{CatalogProduct, CatalogService};
use storefront_commerce::{CommerceError, ProductId};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and order summary.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        id: String,
        /// Quantity, capped at the product's stock.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Remove a product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Add one unit of a product already in the cart.
    Inc {
        /// Product ID.
        id: String,
    },
    /// Remove one unit, keeping at least one.
    Dec {
        /// Product ID.
        id: String,
    },
    /// Remove everything.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Show saved products.
    Show,
    /// Save a product, or unsave it if already saved.
    Toggle {
        /// Product ID.
        id: String,
    },
    /// Remove a saved product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Add one unit of a saved product to the cart. The product stays saved.
    #[command(name = "add-to-cart")]
    AddToCart {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products, with optional filters.
    List(ListArgs),
    /// Search products by text.
    Search {
        /// Search text.
        query: String,
        /// Sort order (default, price-low, price-high, rating, discount).
        #[arg(short, long, default_value = "default")]
        sort: String,
    },
    /// Show one product and remember it as recently viewed.
    Show {
        /// Product ID.
        id: String,
    },
    /// List recently viewed products.
    Recent,
    /// List categories.
    Categories,
}

/// Arguments for `products list`.
#[derive(Args)]
pub struct ListArgs {
    /// Categories, comma-separated.
    #[arg(long)]
    pub category: Option<String>,

    /// Brands, comma-separated.
    #[arg(long)]
    pub brand: Option<String>,

    /// Price range, e.g. "10-50" or "100-".
    #[arg(long)]
    pub price: Option<String>,

    /// Minimum rating.
    #[arg(long)]
    pub rating: Option<String>,

    /// Sort order (default, price-low, price-high, rating, discount).
    #[arg(short, long, default_value = "default")]
    pub sort: String,

    /// Products per page (default: from config).
    #[arg(short, long)]
    pub limit: Option<u64>,

    /// Products to skip.
    #[arg(long, default_value = "0")]
    pub skip: u64,
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Look up a product or fail with a readable error.
pub(crate) fn find_product(catalog: &impl CatalogService, id: &str) -> Result<CatalogProduct> {
    let id = ProductId::parse(id);
    let product = catalog
        .product(&id)?
        .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
    Ok(product)
}

/// Apply the add-to-cart button's stock rules to a requested quantity.
pub(crate) fn stock_limited_quantity(product: &CatalogProduct, requested: i64) -> Result<i64> {
    if !product.is_in_stock() {
        bail!("{} is out of stock", product.title);
    }
    Ok(requested.clamp(1, product.stock))
}

//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.info("No config file found, using defaults."),
    }

    let storage = &ctx.config.storage;
    ctx.output.info("[storage]");
    ctx.output.kv(
        "data_file",
        &ctx.resolve_path(&storage.data_file).display().to_string(),
    );
    if let Some(namespace) = &storage.namespace {
        ctx.output.kv("namespace", namespace);
    }
    ctx.output.kv("cart_key", &storage.keys.cart_key);
    ctx.output.kv("wishlist_key", &storage.keys.wishlist_key);
    ctx.output
        .kv("recently_viewed_key", &storage.keys.recently_viewed_key);
    ctx.output.kv(
        "recently_viewed_limit",
        &storage.recently_viewed_limit.to_string(),
    );

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "file",
        ctx.config
            .catalog
            .file
            .as_deref()
            .unwrap_or("(sample catalog)"),
    );
    ctx.output
        .kv("page_size", &ctx.config.catalog.page_size.to_string());

    let pricing = &ctx.config.pricing;
    ctx.output.info("[pricing]");
    ctx.output.kv(
        "free_shipping_threshold",
        &pricing.free_shipping_threshold.to_string(),
    );
    ctx.output
        .kv("flat_shipping", &pricing.flat_shipping.to_string());
    ctx.output
        .kv("tax_rate_percent", &pricing.tax_rate_percent.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

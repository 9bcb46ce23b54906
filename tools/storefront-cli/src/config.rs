//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::PricingRules;
use storefront_commerce::catalog::DEFAULT_PAGE_SIZE;
use storefront_commerce::recently_viewed::RECENTLY_VIEWED_LIMIT;
use storefront_commerce::storage::StorageKeys;

/// Names searched for, in order, when no `--config` is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Local storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Product catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Order summary rules.
    #[serde(default)]
    pub pricing: PricingRules,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Where and under which keys state is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the local store, relative to the config file.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Prefix for every key (`"<namespace>:cart"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(flatten)]
    pub keys: StorageKeys,

    /// Products kept in the recently viewed list.
    #[serde(default = "default_recently_viewed_limit")]
    pub recently_viewed_limit: usize,
}

fn default_data_file() -> String {
    ".storefront/storage.json".to_string()
}

fn default_recently_viewed_limit() -> usize {
    RECENTLY_VIEWED_LIMIT
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            namespace: None,
            keys: StorageKeys::default(),
            recently_viewed_limit: default_recently_viewed_limit(),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Saved catalog listing (`{"products": [...]}`). The bundled sample
    /// catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Products per page when listing.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            file: None,
            page_size: default_page_size(),
        }
    }
}

/// Generate a default storefront.toml.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[storage]
data_file = ".storefront/storage.json"
# namespace = "shop"
cart_key = "cart"
wishlist_key = "wishlist"
recently_viewed_key = "recentlyViewed"
recently_viewed_limit = 8

[catalog]
# file = "products.json"
page_size = 20

[pricing]
free_shipping_threshold = 50.0
flat_shipping = 4.99
tax_rate_percent = 7.0
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::money::Money;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storage.data_file, ".storefront/storage.json");
        assert_eq!(config.storage.keys, StorageKeys::default());
        assert_eq!(config.storage.recently_viewed_limit, 8);
        assert_eq!(config.catalog.page_size, 20);
        assert_eq!(config.pricing, PricingRules::default());
    }

    #[test]
    fn test_partial_config() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [storage]
            namespace = "shop"
            cart_key = "basket"

            [pricing]
            flat_shipping = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.namespace.as_deref(), Some("shop"));
        assert_eq!(config.storage.keys.cart_key, "basket");
        assert_eq!(config.storage.keys.wishlist_key, "wishlist");
        assert_eq!(config.pricing.flat_shipping, Money::new(250));
        assert_eq!(config.pricing.free_shipping_threshold, Money::new(5000));
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("storefront.json");
        std::fs::write(&json_path, r#"{"catalog": {"page_size": 5}}"#).unwrap();
        assert_eq!(StorefrontConfig::load(&json_path).unwrap().catalog.page_size, 5);

        let toml_path = dir.path().join("storefront.toml");
        std::fs::write(&toml_path, "[catalog]\npage_size = 7\n").unwrap();
        assert_eq!(StorefrontConfig::load(&toml_path).unwrap().catalog.page_size, 7);

        std::fs::write(&toml_path, "[catalog\n").unwrap();
        assert!(StorefrontConfig::load(&toml_path).is_err());
    }
}

//! CLI execution context.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context as _, Result};
use storefront_cache::{Cache, FileStore};
use storefront_commerce::cart::{CartStore, StoredCart};
use storefront_commerce::catalog::InMemoryCatalog;
use storefront_commerce::recently_viewed::RecentlyViewed;
use storefront_commerce::wishlist::Wishlist;

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Catalog used when no catalog file is configured.
const SAMPLE_CATALOG: &str = include_str!("../data/products.json");

/// The local store as shared by the cart and the product lists.
pub type SharedStore = Rc<FileStore>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };

        tracing::debug!(config = ?config_path, "loaded configuration");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find a config file in the directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        })
    }

    /// Directory relative paths in the config are resolved against.
    pub fn root(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd)
    }

    /// Resolve a path from the config.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(self.root(), path)
    }

    /// Open the local store.
    pub fn open_store(&self) -> Result<SharedStore> {
        let path = self.resolve_path(&self.config.storage.data_file);
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open local store: {}", path.display()))?;
        Ok(Rc::new(store))
    }

    fn cache(&self, store: &SharedStore) -> Cache<SharedStore> {
        let cache = Cache::new(Rc::clone(store));
        match &self.config.storage.namespace {
            Some(namespace) => cache.with_namespace(namespace.as_str()),
            None => cache,
        }
    }

    /// The cart, hydrated from the local store.
    pub fn cart(&self, store: &SharedStore) -> CartStore<StoredCart<SharedStore>> {
        let persistence = StoredCart::from_cache(self.cache(store))
            .with_key(self.config.storage.keys.cart_key.as_str());
        CartStore::open(persistence)
    }

    pub fn wishlist(&self, store: &SharedStore) -> Wishlist<SharedStore> {
        Wishlist::from_cache(self.cache(store))
            .with_key(self.config.storage.keys.wishlist_key.as_str())
    }

    pub fn recently_viewed(&self, store: &SharedStore) -> RecentlyViewed<SharedStore> {
        RecentlyViewed::from_cache(self.cache(store))
            .with_key(self.config.storage.keys.recently_viewed_key.as_str())
            .with_limit(self.config.storage.recently_viewed_limit)
    }

    /// Load the product catalog.
    pub fn catalog(&self) -> Result<InMemoryCatalog> {
        match &self.config.catalog.file {
            Some(file) => {
                let path = self.resolve_path(file);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                InMemoryCatalog::from_json(&content)
                    .with_context(|| format!("Failed to parse catalog: {}", path.display()))
            }
            None => InMemoryCatalog::from_json(SAMPLE_CATALOG)
                .context("Failed to parse the sample catalog"),
        }
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

//! Product lists kept directly in the local store.

use crate::catalog::CatalogProduct;
use crate::error::CommerceError;
use storefront_cache::{Cache, CacheError, KeyValueStore};

/// A JSON array of product records under one key.
///
/// Unreadable JSON is treated as an empty list.
#[derive(Debug, Clone)]
pub(crate) struct ProductShelf<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> ProductShelf<S> {
    pub(crate) fn new(cache: Cache<S>, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub(crate) fn load(&self) -> Result<Vec<CatalogProduct>, CommerceError> {
        match self.cache.get::<Vec<CatalogProduct>>(&self.key) {
            Ok(products) => Ok(products.unwrap_or_default()),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable product list");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn save(&self, products: &[CatalogProduct]) -> Result<(), CommerceError> {
        self.cache.set(&self.key, products)?;
        tracing::debug!(key = %self.key, len = products.len(), "saved product list");
        Ok(())
    }
}

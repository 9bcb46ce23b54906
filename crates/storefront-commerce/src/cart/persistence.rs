//! Cart persistence.

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::storage::CART_KEY;
use storefront_cache::{Cache, KeyValueStore};

/// Loads and saves the whole cart.
///
/// `load` returns `Ok(None)` when nothing has been stored yet. A snapshot
/// that cannot be decoded or fails validation is an error; the
/// [`CartStore`](crate::cart::CartStore) decides what to do with it.
pub trait CartPersistence {
    fn load(&self) -> Result<Option<CartState>, CommerceError>;

    fn save(&self, state: &CartState) -> Result<(), CommerceError>;
}

impl<P: CartPersistence + ?Sized> CartPersistence for &P {
    fn load(&self) -> Result<Option<CartState>, CommerceError> {
        (**self).load()
    }

    fn save(&self, state: &CartState) -> Result<(), CommerceError> {
        (**self).save(state)
    }
}

/// Cart persistence on top of a key-value store.
///
/// The cart is written as JSON (`{"items": [...], "totalAmount": n}`)
/// under a single key, replacing the previous value.
#[derive(Debug, Clone)]
pub struct StoredCart<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> StoredCart<S> {
    /// Store the cart under the default key.
    pub fn new(store: S) -> Self {
        Self::from_cache(Cache::new(store))
    }

    /// Store the cart through an existing (possibly namespaced) cache.
    pub fn from_cache(cache: Cache<S>) -> Self {
        Self {
            cache,
            key: CART_KEY.to_string(),
        }
    }

    /// Use a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }
}

impl<S: KeyValueStore> CartPersistence for StoredCart<S> {
    fn load(&self) -> Result<Option<CartState>, CommerceError> {
        Ok(self.cache.get(&self.key)?)
    }

    fn save(&self, state: &CartState) -> Result<(), CommerceError> {
        self.cache.set(&self.key, state)?;
        Ok(())
    }
}

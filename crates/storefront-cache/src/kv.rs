//! Key-value store abstraction with automatic JSON serialization.

use std::rc::Rc;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

/// A synchronous, string-keyed store of string values.
///
/// Mirrors what a browser's local storage offers: no expiry, no
/// transactions, and the last writer to a key wins. Methods take `&self`
/// so implementations can be shared between the cart, the wishlist and
/// the recently-viewed list.
pub trait KeyValueStore {
    /// Get the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List every key in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

/// Typed view over a [`KeyValueStore`].
///
/// Values are stored as JSON text. An optional namespace is prepended to
/// every key (`"shop"` + `"cart"` becomes `"shop:cart"`), so several
/// storefronts can share one backing store.
///
/// # Example
///
/// ```rust
/// use storefront_cache::{Cache, KeyValueStore, MemoryStore};
///
/// let cache = Cache::new(MemoryStore::new()).with_namespace("shop");
/// cache.set("wishlist", &vec![1, 2, 3]).unwrap();
///
/// let ids: Option<Vec<u32>> = cache.get("wishlist").unwrap();
/// assert_eq!(ids, Some(vec![1, 2, 3]));
/// assert!(cache.store().exists("shop:wishlist").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
    namespace: Option<String>,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store without a namespace.
    pub fn new(store: S) -> Self {
        Self {
            store,
            namespace: None,
        }
    }

    /// Prefix every key with `namespace`.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    /// The namespace in use, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve a logical key to the key written to the store.
    pub fn key(&self, name: &str) -> String {
        match &self.namespace {
            Some(namespace) => crate::cache_key!(namespace.as_str(), name),
            None => name.to_string(),
        }
    }

    /// Get and decode a value.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// text is not valid JSON for `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Get the raw stored text.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(&self.key(key))
    }

    /// Encode and store a value, overwriting the previous one.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        let key = self.key(key);
        tracing::trace!(key = %key, bytes = text.len(), "writing value");
        self.store.set(&key, &text)
    }

    /// Delete a value.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(&self.key(key))
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(&self.key(key))
    }

    /// List the logical keys visible through this namespace.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let keys = self.store.keys()?;
        Ok(match &self.namespace {
            Some(namespace) => {
                let prefix = format!("{}:", namespace);
                keys.into_iter()
                    .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
                    .collect()
            }
            None => keys,
        })
    }
}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```rust
/// use storefront_cache::cache_key;
///
/// let key = cache_key!("shop", "cart");
/// assert_eq!(key, "shop:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

//! The wishlist.

use crate::catalog::CatalogProduct;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::shelf::ProductShelf;
use crate::storage::WISHLIST_KEY;
use serde::{Deserialize, Serialize};
use storefront_cache::{Cache, KeyValueStore};

/// Result of [`Wishlist::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistToggle {
    Added,
    Removed,
}

/// Saved products, unique by id, oldest first.
///
/// Unlike the cart there is no in-memory state: every call reads the
/// stored list and every change writes it back.
#[derive(Debug, Clone)]
pub struct Wishlist<S> {
    shelf: ProductShelf<S>,
}

impl<S: KeyValueStore> Wishlist<S> {
    pub fn new(store: S) -> Self {
        Self::from_cache(Cache::new(store))
    }

    pub fn from_cache(cache: Cache<S>) -> Self {
        Self {
            shelf: ProductShelf::new(cache, WISHLIST_KEY),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.shelf.set_key(key);
        self
    }

    pub fn key(&self) -> &str {
        self.shelf.key()
    }

    pub fn items(&self) -> Result<Vec<CatalogProduct>, CommerceError> {
        self.shelf.load()
    }

    pub fn contains(&self, id: &ProductId) -> Result<bool, CommerceError> {
        Ok(self.items()?.iter().any(|p| &p.id == id))
    }

    pub fn get(&self, id: &ProductId) -> Result<Option<CatalogProduct>, CommerceError> {
        Ok(self.items()?.into_iter().find(|p| &p.id == id))
    }

    /// Add the product, or remove it if it is already saved.
    pub fn toggle(&self, product: &CatalogProduct) -> Result<WishlistToggle, CommerceError> {
        let mut items = self.items()?;
        let outcome = if let Some(index) = items.iter().position(|p| p.id == product.id) {
            items.remove(index);
            WishlistToggle::Removed
        } else {
            items.push(product.clone());
            WishlistToggle::Added
        };
        self.shelf.save(&items)?;
        Ok(outcome)
    }

    /// Remove a product. Returns whether it was saved.
    pub fn remove(&self, id: &ProductId) -> Result<bool, CommerceError> {
        let mut items = self.items()?;
        let before = items.len();
        items.retain(|p| &p.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.shelf.save(&items)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), CommerceError> {
        self.shelf.save(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use storefront_cache::MemoryStore;

    fn product(id: i64) -> CatalogProduct {
        CatalogProduct::new(id, format!("Product {}", id), Money::new(1000))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let wishlist = Wishlist::new(MemoryStore::new());
        assert_eq!(wishlist.toggle(&product(1)).unwrap(), WishlistToggle::Added);
        assert_eq!(wishlist.toggle(&product(2)).unwrap(), WishlistToggle::Added);
        assert!(wishlist.contains(&ProductId::from(1)).unwrap());

        assert_eq!(wishlist.toggle(&product(1)).unwrap(), WishlistToggle::Removed);
        let ids: Vec<_> = wishlist.items().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId::from(2)]);
    }

    #[test]
    fn test_remove() {
        let wishlist = Wishlist::new(MemoryStore::new());
        wishlist.toggle(&product(1)).unwrap();

        assert!(wishlist.remove(&ProductId::from(1)).unwrap());
        assert!(!wishlist.remove(&ProductId::from(1)).unwrap());
        assert!(wishlist.items().unwrap().is_empty());
    }

    #[test]
    fn test_stored_as_product_records() {
        let store = MemoryStore::new();
        let wishlist = Wishlist::new(&store);
        wishlist.toggle(&product(7).with_brand("Acme")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&store.get("wishlist").unwrap().unwrap()).unwrap();
        assert_eq!(raw[0]["id"], serde_json::json!(7));
        assert_eq!(raw[0]["brand"], serde_json::json!("Acme"));
        assert_eq!(raw[0]["price"], serde_json::json!(10.0));
    }

    #[test]
    fn test_malformed_wishlist_is_empty() {
        let store = MemoryStore::new();
        store.set("wishlist", "[{broken").unwrap();

        let wishlist = Wishlist::new(&store);
        assert!(wishlist.items().unwrap().is_empty());
        assert_eq!(wishlist.toggle(&product(1)).unwrap(), WishlistToggle::Added);
        assert_eq!(wishlist.items().unwrap().len(), 1);
    }

    #[test]
    fn test_clear() {
        let wishlist = Wishlist::new(MemoryStore::new()).with_key("saved");
        wishlist.toggle(&product(1)).unwrap();
        wishlist.clear().unwrap();
        assert!(wishlist.items().unwrap().is_empty());
        assert_eq!(wishlist.key(), "saved");
    }
}

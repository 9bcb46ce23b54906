//! Recently viewed products.

use crate::catalog::CatalogProduct;
use crate::error::CommerceError;
use crate::shelf::ProductShelf;
use crate::storage::RECENTLY_VIEWED_KEY;
use storefront_cache::{Cache, KeyValueStore};

/// How many products are remembered by default.
pub const RECENTLY_VIEWED_LIMIT: usize = 8;

/// The last few products opened, newest first.
#[derive(Debug, Clone)]
pub struct RecentlyViewed<S> {
    shelf: ProductShelf<S>,
    limit: usize,
}

impl<S: KeyValueStore> RecentlyViewed<S> {
    pub fn new(store: S) -> Self {
        Self::from_cache(Cache::new(store))
    }

    pub fn from_cache(cache: Cache<S>) -> Self {
        Self {
            shelf: ProductShelf::new(cache, RECENTLY_VIEWED_KEY),
            limit: RECENTLY_VIEWED_LIMIT,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.shelf.set_key(key);
        self
    }

    /// Remember at most `limit` products (at least one).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Move `product` to the front, dropping older entries past the limit.
    pub fn record(&self, product: &CatalogProduct) -> Result<(), CommerceError> {
        let mut items = self.shelf.load()?;
        items.retain(|p| p.id != product.id);
        items.insert(0, product.clone());
        items.truncate(self.limit);
        self.shelf.save(&items)
    }

    pub fn items(&self) -> Result<Vec<CatalogProduct>, CommerceError> {
        let mut items = self.shelf.load()?;
        items.truncate(self.limit);
        Ok(items)
    }

    pub fn clear(&self) -> Result<(), CommerceError> {
        self.shelf.save(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Money;
    use storefront_cache::MemoryStore;

    fn product(id: i64) -> CatalogProduct {
        CatalogProduct::new(id, format!("Product {}", id), Money::new(100))
    }

    fn ids<S: KeyValueStore>(recent: &RecentlyViewed<S>) -> Vec<ProductId> {
        recent.items().unwrap().into_iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_newest_first_without_duplicates() {
        let recent = RecentlyViewed::new(MemoryStore::new());
        recent.record(&product(1)).unwrap();
        recent.record(&product(2)).unwrap();
        recent.record(&product(1)).unwrap();

        assert_eq!(ids(&recent), vec![ProductId::from(1), ProductId::from(2)]);
    }

    #[test]
    fn test_keeps_limit() {
        let recent = RecentlyViewed::new(MemoryStore::new());
        for id in 1..=10 {
            recent.record(&product(id)).unwrap();
        }

        let ids = ids(&recent);
        assert_eq!(ids.len(), RECENTLY_VIEWED_LIMIT);
        assert_eq!(ids.first(), Some(&ProductId::from(10)));
        assert_eq!(ids.last(), Some(&ProductId::from(3)));
    }

    #[test]
    fn test_custom_limit() {
        let recent = RecentlyViewed::new(MemoryStore::new()).with_limit(2);
        for id in 1..=3 {
            recent.record(&product(id)).unwrap();
        }
        assert_eq!(ids(&recent), vec![ProductId::from(3), ProductId::from(2)]);
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        let recent = RecentlyViewed::new(&store);
        recent.record(&product(1)).unwrap();
        recent.clear().unwrap();

        assert!(recent.items().unwrap().is_empty());
        assert_eq!(store.get("recentlyViewed").unwrap().as_deref(), Some("[]"));
    }
}

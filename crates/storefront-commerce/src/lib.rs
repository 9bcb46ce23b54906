//! Storefront domain types and logic.
//!
//! - **Cart**: line items with a derived total, a store that persists
//!   after every change, and the order summary
//! - **Wishlist** and **recently viewed** product lists
//! - **Catalog**: product records, queries and an in-memory catalog
//! - **Search**: client-side filters and sort orders
//!
//! All persistent state lives in a [`storefront_cache::KeyValueStore`].
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::MemoryStore;
//! use storefront_commerce::prelude::*;
//!
//! let store = MemoryStore::new();
//! let mut cart = CartStore::open(StoredCart::new(&store));
//!
//! let product = CatalogProduct::new(1, "Essence Mascara", Money::new(999)).with_stock(5);
//! cart.add_item(&product, 2).unwrap();
//!
//! let summary = OrderSummary::calculate(cart.state(), &PricingRules::default()).unwrap();
//! println!("Total: {}", summary.grand_total);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod storage;

pub mod cart;
pub mod catalog;
pub mod recently_viewed;
pub mod search;
pub mod wishlist;

mod shelf;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;
    pub use crate::storage::StorageKeys;

    // Cart
    pub use crate::cart::{
        CartAction, CartLineItem, CartPersistence, CartState, CartStore, OrderSummary,
        PricingRules, ProductSnapshot, StoredCart,
    };

    // Catalog
    pub use crate::catalog::{
        CatalogPage, CatalogProduct, CatalogQuery, CatalogService, Category, InMemoryCatalog,
        PageRequest,
    };

    // Lists
    pub use crate::recently_viewed::RecentlyViewed;
    pub use crate::wishlist::{Wishlist, WishlistToggle};

    // Search
    pub use crate::search::{PriceRange, ProductFilter, SortOption};
}

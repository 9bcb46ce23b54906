//! Keys used in the local store.

use serde::{Deserialize, Serialize};

/// Key of the serialized cart.
pub const CART_KEY: &str = "cart";

/// Key of the wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

/// Key of the recently viewed products.
pub const RECENTLY_VIEWED_KEY: &str = "recentlyViewed";

/// The keys each collection is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub cart_key: String,
    pub wishlist_key: String,
    pub recently_viewed_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            cart_key: CART_KEY.to_string(),
            wishlist_key: WISHLIST_KEY.to_string(),
            recently_viewed_key: RECENTLY_VIEWED_KEY.to_string(),
        }
    }
}

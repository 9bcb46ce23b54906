//! Local key-value storage for the storefront.
//!
//! The storefront keeps its cart, wishlist and recently-viewed list in a
//! small string-keyed store, the way a browser keeps them in local storage.
//! This crate provides:
//!
//! - [`KeyValueStore`]: the store interface (get/set/delete by string key)
//! - [`MemoryStore`]: process-local store for tests
//! - [`FileStore`]: a JSON file on disk, used by the command-line storefront
//! - `SpinStore`: Spin's Key-Value Store, on `wasm32` targets
//! - [`Cache`]: typed JSON access with optional key namespacing
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("recentlyViewed", &vec!["phone", "laptop"]).unwrap();
//!
//! let recent: Option<Vec<String>> = cache.get("recentlyViewed").unwrap();
//! assert_eq!(recent.unwrap().len(), 2);
//! ```

mod error;
mod file;
mod kv;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}

//! Product catalog module.
//!
//! Contains the product records returned by the catalog API, the queries
//! the storefront sends to it, and the [`CatalogService`] interface.

mod category;
mod product;
mod query;
mod service;

pub use category::Category;
pub use product::CatalogProduct;
pub use query::{CatalogPage, CatalogQuery, PageRequest, DEFAULT_PAGE_SIZE};
pub use service::{CatalogService, InMemoryCatalog};

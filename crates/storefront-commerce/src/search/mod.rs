//! Search module.
//!
//! Client-side filtering and sorting of catalog listings.

mod filter;
mod sort;

pub use filter::{PriceRange, ProductFilter};
pub use sort::SortOption;

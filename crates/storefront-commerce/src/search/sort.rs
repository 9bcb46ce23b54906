//! Listing sort orders.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::CatalogProduct;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    #[serde(alias = "default")]
    Featured,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Biggest discount first.
    Discount,
}

impl SortOption {
    /// Every option, in menu order.
    pub const ALL: [SortOption; 5] = [
        SortOption::Featured,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Rating,
        SortOption::Discount,
    ];

    /// The query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "default",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
            SortOption::Discount => "discount",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
            SortOption::Discount => "Biggest Discount",
        }
    }

    fn compare(&self, a: &CatalogProduct, b: &CatalogProduct) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceLow => a.price.cmp(&b.price),
            SortOption::PriceHigh => b.price.cmp(&a.price),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
            SortOption::Discount => b.discount_percentage.total_cmp(&a.discount_percentage),
        }
    }

    /// Sort in place. Ties keep their catalog order.
    pub fn sort(&self, products: &mut [CatalogProduct]) {
        if *self != SortOption::Featured {
            products.sort_by(|a, b| self.compare(a, b));
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" | "featured" => Ok(SortOption::Featured),
            "price-low" => Ok(SortOption::PriceLow),
            "price-high" => Ok(SortOption::PriceHigh),
            "rating" => Ok(SortOption::Rating),
            "discount" => Ok(SortOption::Discount),
            other => Err(CommerceError::InvalidFilter(format!("sort '{}'", other))),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

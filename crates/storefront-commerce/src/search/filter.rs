//! Product filters.

use crate::catalog::CatalogProduct;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An inclusive price range; `max` of `None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Option<Money>,
}

impl PriceRange {
    /// Create a price range.
    pub fn new(min: Money, max: Option<Money>) -> Self {
        Self { min, max }
    }

    /// Parse the `"min-max"` form. A missing or zero max is open-ended.
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        let invalid = || CommerceError::InvalidFilter(format!("price range '{}'", input));
        let parse_bound = |s: &str| -> Result<Option<Money>, CommerceError> {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            let value: f64 = s.parse().map_err(|_| invalid())?;
            if value < 0.0 {
                return Err(invalid());
            }
            Money::from_decimal(value).map(Some).ok_or_else(invalid)
        };

        let (min, max) = match input.split_once('-') {
            Some((min, max)) => (parse_bound(min)?, parse_bound(max)?),
            None => (parse_bound(input)?, None),
        };
        let min = min.unwrap_or_default();
        let max = max.filter(|m| !m.is_zero());

        if let Some(max) = max {
            if max < min {
                return Err(invalid());
            }
        }
        Ok(Self::new(min, max))
    }

    /// Check if a price falls inside the range.
    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

/// Filters applied to a product listing.
///
/// Each populated criterion must match; within the category and brand
/// lists any entry may match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Category slugs, matched exactly.
    pub categories: Vec<String>,
    /// Brand names, matched case-insensitively.
    pub brands: Vec<String>,
    /// Price range.
    pub price: Option<PriceRange>,
    /// Minimum rating.
    pub min_rating: Option<f64>,
}

impl ProductFilter {
    /// A filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the query-string forms: `"a,b"` lists, `"10-50"` price
    /// ranges and a numeric rating.
    pub fn from_params(
        category: Option<&str>,
        brand: Option<&str>,
        price: Option<&str>,
        rating: Option<&str>,
    ) -> Result<Self, CommerceError> {
        let mut filter = Self::new();
        filter.categories = category.map(split_list).unwrap_or_default();
        filter.brands = brand.map(split_list).unwrap_or_default();
        filter.price = price.map(PriceRange::parse).transpose()?;
        filter.min_rating = rating
            .map(|r| {
                r.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|r| r.is_finite())
                    .ok_or_else(|| CommerceError::InvalidFilter(format!("rating '{}'", r)))
            })
            .transpose()?;
        Ok(filter)
    }

    /// Add a category.
    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.categories.push(slug.into());
        self
    }

    /// Add a brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.push(brand.into());
        self
    }

    /// Restrict the price.
    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    /// Require a minimum rating.
    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Check if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.brands.is_empty()
            && self.price.is_none()
            && self.min_rating.is_none()
    }

    /// Check a single product.
    pub fn matches(&self, product: &CatalogProduct) -> bool {
        if !self.categories.is_empty() && !self.categories.iter().any(|c| c == &product.category)
        {
            return false;
        }

        if !self.brands.is_empty() {
            let Some(brand) = product.brand.as_deref() else {
                return false;
            };
            if !self.brands.iter().any(|b| b.eq_ignore_ascii_case(brand)) {
                return false;
            }
        }

        if let Some(range) = &self.price {
            if !range.contains(product.price) {
                return false;
            }
        }

        self.min_rating.map_or(true, |min| product.rating >= min)
    }

    /// Keep the matching products, preserving order.
    pub fn apply(&self, products: Vec<CatalogProduct>) -> Vec<CatalogProduct> {
        if self.is_empty() {
            return products;
        }
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

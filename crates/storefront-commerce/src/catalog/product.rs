//! Product records returned by the catalog API.

use crate::cart::ProductSnapshot;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Field names follow the catalog API (`discountPercentage`, `thumbnail`).
/// Everything except `id`, `title` and `price` is optional on the wire so
/// partial records (as found in old wishlists) still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Product identifier.
    pub id: ProductId,
    /// Product name.
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// Current unit price.
    pub price: Money,
    /// Advertised discount, in percent.
    #[serde(default)]
    pub discount_percentage: f64,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Units available.
    #[serde(default)]
    pub stock: i64,
    /// Brand name; some catalog entries have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

impl CatalogProduct {
    /// Create a product with just the fields the cart needs.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            price,
            discount_percentage: 0.0,
            rating: 0.0,
            stock: 0,
            brand: None,
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the category slug.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the discount percentage.
    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount_percentage = percent;
        self
    }

    /// Check if the product can be added to a cart.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Price and display fields frozen for a cart line item.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            brand: self.brand.clone(),
            thumbnail: self.thumbnail.clone(),
            price: self.price,
        }
    }

    /// Case-insensitive text match against title, description, brand and category.
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            Some(self.title.as_str()),
            Some(self.description.as_str()),
            Some(self.category.as_str()),
            self.brand.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

impl From<&CatalogProduct> for ProductSnapshot {
    fn from(product: &CatalogProduct) -> Self {
        product.snapshot()
    }
}

//! The catalog service interface and an in-memory implementation.

use std::collections::BTreeSet;

use crate::catalog::{CatalogPage, CatalogProduct, CatalogQuery, Category};
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::Deserialize;

/// Read-only access to the product catalog.
///
/// The cart never calls this; pages and commands use it to find the
/// products they then hand to the cart.
pub trait CatalogService {
    /// Look up a single product.
    fn product(&self, id: &ProductId) -> Result<Option<CatalogProduct>, CommerceError>;

    /// Run a listing query.
    fn products(&self, query: &CatalogQuery) -> Result<CatalogPage, CommerceError>;

    /// List the catalog's categories.
    fn categories(&self) -> Result<Vec<Category>, CommerceError>;
}

/// A catalog held in memory, e.g. loaded from a saved API response.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<CatalogProduct>,
}

/// Accepted document shapes: an API listing or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Listing { products: Vec<CatalogProduct> },
    Products(Vec<CatalogProduct>),
}

impl InMemoryCatalog {
    /// Create a catalog from products, in listing order.
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    /// Parse a catalog API listing (`{"products": [...]}`) or a JSON array.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| CommerceError::Catalog(format!("invalid catalog document: {}", e)))?;
        let products = match document {
            CatalogDocument::Listing { products } | CatalogDocument::Products(products) => {
                products
            }
        };
        Ok(Self::new(products))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogService for InMemoryCatalog {
    fn product(&self, id: &ProductId) -> Result<Option<CatalogProduct>, CommerceError> {
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }

    fn products(&self, query: &CatalogQuery) -> Result<CatalogPage, CommerceError> {
        let matching: Vec<&CatalogProduct> = self
            .products
            .iter()
            .filter(|p| match query {
                CatalogQuery::All(_) => true,
                CatalogQuery::Category { slug, .. } => &p.category == slug,
                CatalogQuery::Search { text, .. } => p.matches_text(text),
            })
            .collect();

        let page = query.page();
        let total = matching.len() as u64;
        let take = if page.limit == 0 {
            usize::MAX
        } else {
            page.limit as usize
        };
        let products = matching
            .into_iter()
            .skip(page.skip as usize)
            .take(take)
            .cloned()
            .collect();

        Ok(CatalogPage {
            products,
            total,
            skip: page.skip,
            limit: page.limit,
        })
    }

    fn categories(&self) -> Result<Vec<Category>, CommerceError> {
        let slugs: BTreeSet<&str> = self
            .products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|slug| !slug.is_empty())
            .collect();
        Ok(slugs.into_iter().map(Category::from_slug).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PageRequest;
    use crate::money::Money;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            CatalogProduct::new(1, "iPhone 9", Money::new(54900)).with_category("smartphones"),
            CatalogProduct::new(2, "iPhone X", Money::new(89900)).with_category("smartphones"),
            CatalogProduct::new(3, "Galaxy Book", Money::new(149900)).with_category("laptops"),
            CatalogProduct::new(4, "Oil Free Moisturizer", Money::new(4000))
                .with_category("skincare"),
        ])
    }

    #[test]
    fn test_product_lookup() {
        let catalog = catalog();
        let found = catalog.product(&ProductId::from(3)).unwrap();
        assert_eq!(found.unwrap().title, "Galaxy Book");
        assert!(catalog.product(&ProductId::from(99)).unwrap().is_none());
    }

    #[test]
    fn test_category_paging() {
        let catalog = catalog();
        let page = catalog
            .products(&CatalogQuery::category("smartphones", PageRequest::new(1, 0)))
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.products.len(), 1);
        assert!(page.has_more());

        let next = catalog
            .products(&CatalogQuery::category("smartphones", page.next_page().unwrap()))
            .unwrap();
        assert_eq!(next.products[0].title, "iPhone X");
        assert!(!next.has_more());
    }

    #[test]
    fn test_search_is_unpaged() {
        let page = catalog().products(&CatalogQuery::search("iphone")).unwrap();
        assert_eq!(page.products.len(), 2);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_categories_are_unique_and_sorted() {
        let slugs: Vec<String> = catalog()
            .categories()
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(slugs, vec!["laptops", "skincare", "smartphones"]);
    }

    #[test]
    fn test_from_json_shapes() {
        let listing = r#"{"products":[{"id":1,"title":"A","price":1.5}],"total":1,"skip":0,"limit":30}"#;
        assert_eq!(InMemoryCatalog::from_json(listing).unwrap().len(), 1);

        let array = r#"[{"id":1,"title":"A","price":1.5},{"id":2,"title":"B","price":2}]"#;
        assert_eq!(InMemoryCatalog::from_json(array).unwrap().len(), 2);

        assert!(matches!(
            InMemoryCatalog::from_json("{not json"),
            Err(CommerceError::Catalog(_))
        ));
    }
}

//! Catalog queries and paged results.

use crate::catalog::CatalogProduct;
use serde::{Deserialize, Serialize};

/// Products fetched per page when browsing.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// A `limit`/`skip` window over a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum products to return; 0 means no limit.
    pub limit: u64,
    /// Products to skip from the start of the listing.
    pub skip: u64,
}

impl PageRequest {
    /// Create a window from raw limit and skip.
    pub fn new(limit: u64, skip: u64) -> Self {
        Self { limit, skip }
    }

    /// The window for a 1-indexed page number.
    pub fn page(page: u64, per_page: u64) -> Self {
        Self::new(per_page, page.max(1).saturating_sub(1).saturating_mul(per_page))
    }

    fn query_string(&self) -> String {
        format!("limit={}&skip={}", self.limit, self.skip)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::page(1, DEFAULT_PAGE_SIZE)
    }
}

/// A listing request to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogQuery {
    /// Every product.
    All(PageRequest),
    /// Products in one category.
    Category { slug: String, page: PageRequest },
    /// Free-text search.
    Search { text: String, page: PageRequest },
}

impl CatalogQuery {
    /// List every product.
    pub fn all(page: PageRequest) -> Self {
        CatalogQuery::All(page)
    }

    /// List one category.
    pub fn category(slug: impl Into<String>, page: PageRequest) -> Self {
        CatalogQuery::Category {
            slug: slug.into(),
            page,
        }
    }

    /// Search by text.
    pub fn search(text: impl Into<String>) -> Self {
        CatalogQuery::Search {
            text: text.into(),
            page: PageRequest::new(0, 0),
        }
    }

    /// The page window of this query.
    pub fn page(&self) -> PageRequest {
        match self {
            CatalogQuery::All(page)
            | CatalogQuery::Category { page, .. }
            | CatalogQuery::Search { page, .. } => *page,
        }
    }

    /// Path and query string on the catalog API.
    pub fn path(&self) -> String {
        match self {
            CatalogQuery::All(page) => format!("/products?{}", page.query_string()),
            CatalogQuery::Category { slug, page } => format!(
                "/products/category/{}?{}",
                encode_component(slug),
                page.query_string()
            ),
            CatalogQuery::Search { text, page } => {
                let mut path = format!("/products/search?q={}", encode_component(text));
                if page.limit > 0 || page.skip > 0 {
                    path.push('&');
                    path.push_str(&page.query_string());
                }
                path
            }
        }
    }
}

/// Percent-encode everything outside the URL unreserved set.
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Products on this page.
    pub products: Vec<CatalogProduct>,
    /// Size of the whole listing.
    #[serde(default)]
    pub total: u64,
    /// Offset of this page.
    #[serde(default)]
    pub skip: u64,
    /// Requested page size.
    #[serde(default)]
    pub limit: u64,
}

impl CatalogPage {
    /// An empty listing.
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            total: 0,
            skip: 0,
            limit: 0,
        }
    }

    /// Check if products remain beyond this page.
    pub fn has_more(&self) -> bool {
        self.end() < self.total
    }

    /// The request for the page after this one.
    pub fn next_page(&self) -> Option<PageRequest> {
        self.has_more().then(|| PageRequest::new(self.limit, self.end()))
    }

    /// Offset just past the last product on this page.
    pub fn end(&self) -> u64 {
        self.skip.saturating_add(self.products.len() as u64)
    }
}

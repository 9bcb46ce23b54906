//! Category listing.

use serde::{Deserialize, Serialize};

/// A product category as listed by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category {
    /// URL-friendly slug, used in category queries.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Catalog URL listing the category's products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Category {
    /// Build a category from its slug, deriving a display name
    /// (`"mens-shirts"` becomes `"Mens Shirts"`).
    pub fn from_slug(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let name = slug
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            slug,
            name,
            url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slug() {
        let category = Category::from_slug("mens-shirts");
        assert_eq!(category.slug, "mens-shirts");
        assert_eq!(category.name, "Mens Shirts");
    }

    #[test]
    fn test_api_shape() {
        let json = r#"{"slug":"beauty","name":"Beauty","url":"https://dummyjson.com/products/category/beauty"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "Beauty");
        assert!(category.url.is_some());
    }
}

//! Product identifiers.
//!
//! Catalog ids arrive as JSON numbers from the product API, but stored
//! carts and wishlists may carry string ids. Both forms are kept as-is:
//! `1` and `"1"` are different products.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A product identifier, numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id, as issued by the catalog API.
    Number(i64),
    /// Any other id.
    Text(String),
}

impl ProductId {
    /// Create a textual ID.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId::Text(id.into())
    }

    /// Parse user input, preferring the numeric form when it fits.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        input
            .parse::<i64>()
            .map(ProductId::Number)
            .unwrap_or_else(|_| ProductId::Text(input.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId::Text(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefers_number() {
        assert_eq!(ProductId::parse("42"), ProductId::Number(42));
        assert_eq!(ProductId::parse(" 42 "), ProductId::Number(42));
        assert_eq!(ProductId::parse("sku-42"), ProductId::new("sku-42"));
    }

    #[test]
    fn test_number_and_text_differ() {
        assert_ne!(ProductId::from(1), ProductId::from("1"));
    }

    #[test]
    fn test_untagged_json() {
        let ids: Vec<ProductId> = serde_json::from_str(r#"[1, "abc"]"#).unwrap();
        assert_eq!(ids, vec![ProductId::Number(1), ProductId::new("abc")]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[1,"abc"]"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductId::from(7).to_string(), "7");
        assert_eq!(ProductId::new("x-1").to_string(), "x-1");
    }
}

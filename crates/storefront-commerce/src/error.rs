//! Commerce error types.

use storefront_cache::CacheError;
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid price on a line item or product.
    #[error("Invalid price for {id}: {price}")]
    InvalidPrice { id: String, price: String },

    /// The same product appears twice in a cart snapshot.
    #[error("Duplicate line item: {0}")]
    DuplicateItem(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,

    /// A filter parameter could not be parsed.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Stored data could not be decoded.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The local store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The catalog service failed.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl From<CacheError> for CommerceError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::SerializeError(e) => CommerceError::Deserialization(e.to_string()),
            other => CommerceError::Storage(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Deserialization(e.to_string())
    }
}

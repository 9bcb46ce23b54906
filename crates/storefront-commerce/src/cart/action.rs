//! Cart actions.

use crate::cart::ProductSnapshot;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A change requested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartAction {
    /// Add units of a product, merging with an existing line item.
    AddItem {
        product: ProductSnapshot,
        quantity: i64,
    },
    /// Remove a product entirely.
    RemoveItem { id: ProductId },
    /// One more unit.
    IncrementQuantity { id: ProductId },
    /// One fewer unit, never below 1.
    DecrementQuantity { id: ProductId },
    /// Remove everything.
    ClearCart,
}

impl CartAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::AddItem { .. } => "addItem",
            CartAction::RemoveItem { .. } => "removeItem",
            CartAction::IncrementQuantity { .. } => "incrementQuantity",
            CartAction::DecrementQuantity { .. } => "decrementQuantity",
            CartAction::ClearCart => "clearCart",
        }
    }
}

//! Cart state and line items.

use crate::cart::CartAction;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The fields of a product that a cart line item freezes when it is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
    pub price: Money,
}

impl ProductSnapshot {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            brand: None,
            thumbnail: String::new(),
            price,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }
}

/// A line item in the cart.
///
/// Stored carts carry the whole product record next to `quantity`; only
/// the fields below are kept, the rest is ignored when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Product name at the time it was added.
    pub title: String,
    /// Brand at the time it was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Thumbnail at the time it was added.
    #[serde(default)]
    pub thumbnail: String,
    /// Unit price at the time it was added.
    pub price: Money,
    /// Quantity, at least 1.
    pub quantity: i64,
}

impl CartLineItem {
    fn new(product: ProductSnapshot, quantity: i64) -> Self {
        Self {
            id: product.id,
            title: product.title,
            brand: product.brand,
            thumbnail: product.thumbnail,
            price: product.price,
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .checked_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// The cart: ordered line items and their total.
///
/// `total_amount` is recomputed from the items after every change and is
/// never adjusted on its own. Deserializing validates the items and
/// recomputes the total, so a loaded state upholds the same rules as one
/// built through the operations below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CartSnapshot")]
pub struct CartState {
    items: Vec<CartLineItem>,
    total_amount: Money,
}

/// A cart as found in storage, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    #[serde(default)]
    pub total_amount: Option<Money>,
}

impl TryFrom<CartSnapshot> for CartState {
    type Error = CommerceError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for item in &snapshot.items {
            if item.quantity < 1 {
                return Err(CommerceError::InvalidQuantity(item.quantity));
            }
            check_price(&item.id, item.price)?;
            if !seen.insert(&item.id) {
                return Err(CommerceError::DuplicateItem(item.id.to_string()));
            }
        }

        let total_amount = compute_total(&snapshot.items)?;
        count_units(&snapshot.items)?;
        if let Some(stored) = snapshot.total_amount {
            if stored != total_amount {
                tracing::warn!(
                    stored = %stored,
                    computed = %total_amount,
                    "stored cart total disagrees with its items, using computed total"
                );
            }
        }

        Ok(Self {
            items: snapshot.items,
            total_amount,
        })
    }
}

/// Prices must be non-negative and small enough to store exactly.
fn check_price(id: &ProductId, price: Money) -> Result<(), CommerceError> {
    if price.is_negative() || !price.is_representable() {
        return Err(CommerceError::InvalidPrice {
            id: id.to_string(),
            price: price.to_string(),
        });
    }
    Ok(())
}

fn count_units(items: &[CartLineItem]) -> Result<i64, CommerceError> {
    items.iter().try_fold(0i64, |count, item| {
        count.checked_add(item.quantity).ok_or(CommerceError::Overflow)
    })
}

fn compute_total(items: &[CartLineItem]) -> Result<Money, CommerceError> {
    items.iter().try_fold(Money::zero(), |total, item| {
        total
            .checked_add(item.line_total()?)
            .ok_or(CommerceError::Overflow)
    })
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items, in the order they were first added.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of price times quantity over all items.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units (sum of quantities).
    pub fn item_count(&self) -> Result<i64, CommerceError> {
        count_units(&self.items)
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line item has its quantity increased; its frozen price
    /// and display fields are kept. Otherwise a new line item is appended.
    /// Negative prices and prices past [`Money::MAX_CENTS`] are rejected.
    pub fn add_item(
        &mut self,
        product: ProductSnapshot,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        check_price(&product.id, product.price)?;

        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.id == product.id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CommerceError::Overflow)?;
            }
            None => items.push(CartLineItem::new(product, quantity)),
        }

        self.commit(items)?;
        Ok(true)
    }

    /// Remove a product. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        if !self.contains(id) {
            return Ok(false);
        }
        let items = self.items.iter().filter(|i| &i.id != id).cloned().collect();
        self.commit(items)?;
        Ok(true)
    }

    /// Add one unit of a product already in the cart.
    pub fn increment_quantity(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        self.update_quantity(id, |quantity| {
            quantity.checked_add(1).ok_or(CommerceError::Overflow).map(Some)
        })
    }

    /// Remove one unit of a product. A quantity of 1 is left as is.
    pub fn decrement_quantity(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        self.update_quantity(id, |quantity| Ok((quantity > 1).then(|| quantity - 1)))
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        self.items.clear();
        self.total_amount = Money::zero();
        changed
    }

    /// Apply an action, returning whether the state changed.
    pub fn apply(&mut self, action: CartAction) -> Result<bool, CommerceError> {
        match action {
            CartAction::AddItem { product, quantity } => self.add_item(product, quantity),
            CartAction::RemoveItem { id } => self.remove_item(&id),
            CartAction::IncrementQuantity { id } => self.increment_quantity(&id),
            CartAction::DecrementQuantity { id } => self.decrement_quantity(&id),
            CartAction::ClearCart => Ok(self.clear()),
        }
    }

    /// Change one item's quantity. `step` returns `None` to leave it as is.
    fn update_quantity<F>(&mut self, id: &ProductId, step: F) -> Result<bool, CommerceError>
    where
        F: FnOnce(i64) -> Result<Option<i64>, CommerceError>,
    {
        let Some(index) = self.items.iter().position(|i| &i.id == id) else {
            return Ok(false);
        };
        let Some(quantity) = step(self.items[index].quantity)? else {
            return Ok(false);
        };

        let mut items = self.items.clone();
        items[index].quantity = quantity;
        self.commit(items)?;
        Ok(true)
    }

    fn commit(&mut self, items: Vec<CartLineItem>) -> Result<(), CommerceError> {
        let total_amount = compute_total(&items)?;
        count_units(&items)?;
        self.items = items;
        self.total_amount = total_amount;
        Ok(())
    }
}

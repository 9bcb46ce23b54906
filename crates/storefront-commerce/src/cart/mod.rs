//! Shopping cart module.
//!
//! [`CartState`] holds the line items and their derived total. [`CartStore`]
//! owns one state per session, routes every change through
//! [`CartStore::dispatch`], persists the result and notifies subscribers.

mod action;
mod cart;
mod persistence;
mod pricing;
mod store;

pub use action::CartAction;
pub use cart::{CartLineItem, CartSnapshot, CartState, ProductSnapshot};
pub use persistence::{CartPersistence, StoredCart};
pub use pricing::{OrderSummary, PricingRules};
pub use store::CartStore;

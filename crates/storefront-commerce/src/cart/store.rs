//! The cart store.

use crate::cart::{CartAction, CartPersistence, CartState, ProductSnapshot};
use crate::error::CommerceError;
use crate::ids::ProductId;
use tokio::sync::watch;

/// Owns the session's cart.
///
/// Every change goes through [`dispatch`](Self::dispatch): the action is
/// applied to the in-memory state, subscribers see the new state if it
/// changed, and the full state is written back through the persistence
/// layer.
///
/// # Example
///
/// ```rust
/// use storefront_cache::MemoryStore;
/// use storefront_commerce::cart::{CartStore, ProductSnapshot, StoredCart};
/// use storefront_commerce::money::Money;
///
/// let store = MemoryStore::new();
/// let mut cart = CartStore::open(StoredCart::new(&store));
/// cart.add_item(ProductSnapshot::new(1, "Lamp", Money::new(1000)), 2).unwrap();
/// assert_eq!(cart.state().total_amount(), Money::new(2000));
///
/// // A new session sees the saved cart.
/// let reopened = CartStore::open(StoredCart::new(&store));
/// assert_eq!(reopened.state(), cart.state());
/// ```
pub struct CartStore<P> {
    state: CartState,
    persistence: P,
    sender: watch::Sender<CartState>,
}

impl<P: CartPersistence> CartStore<P> {
    /// Hydrate from `persistence`.
    ///
    /// A missing, unreadable or invalid stored cart yields an empty cart;
    /// the problem is logged and not returned.
    pub fn open(persistence: P) -> Self {
        let state = match persistence.load() {
            Ok(Some(state)) => {
                tracing::debug!(
                    items = state.len(),
                    total = %state.total_amount(),
                    "hydrated cart"
                );
                state
            }
            Ok(None) => {
                tracing::debug!("no stored cart, starting empty");
                CartState::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding stored cart");
                CartState::default()
            }
        };

        let (sender, _) = watch::channel(state.clone());
        Self {
            state,
            persistence,
            sender,
        }
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Watch committed states. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.sender.subscribe()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Apply an action and persist the result.
    ///
    /// Returns whether the state changed. A rejected action leaves the
    /// state untouched and writes nothing. If the write fails the
    /// in-memory state keeps the change and the storage error is returned.
    pub fn dispatch(&mut self, action: CartAction) -> Result<bool, CommerceError> {
        let name = action.name();
        let changed = self.state.apply(action).inspect_err(|e| {
            tracing::debug!(action = name, error = %e, "cart action rejected");
        })?;

        if changed {
            self.sender.send_replace(self.state.clone());
        }

        if let Err(e) = self.persistence.save(&self.state) {
            tracing::warn!(action = name, error = %e, "failed to persist cart");
            return Err(e);
        }

        tracing::debug!(
            action = name,
            changed,
            items = self.state.len(),
            total = %self.state.total_amount(),
            "cart updated"
        );
        Ok(changed)
    }

    /// Add `quantity` units of a product, merging with an existing line.
    ///
    /// Fails with `InvalidQuantity` for a quantity below 1 and with
    /// `InvalidPrice` for a price that cannot be stored.
    pub fn add_item(
        &mut self,
        product: impl Into<ProductSnapshot>,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::AddItem {
            product: product.into(),
            quantity,
        })
    }

    /// Remove a product. An absent id is a no-op.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::RemoveItem { id: id.clone() })
    }

    /// Add one unit of a product already in the cart.
    pub fn increment_quantity(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::IncrementQuantity { id: id.clone() })
    }

    /// Remove one unit, keeping at least one.
    pub fn decrement_quantity(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::DecrementQuantity { id: id.clone() })
    }

    /// Empty the cart. Saved even when it was already empty.
    pub fn clear_cart(&mut self) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::ClearCart)
    }
}

impl<P> std::fmt::Debug for CartStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::cell::{Cell, RefCell};

    /// Records every save; can be told to fail.
    #[derive(Default)]
    struct RecordingPersistence {
        stored: Option<CartState>,
        load_error: bool,
        fail_saves: Cell<bool>,
        saves: RefCell<Vec<CartState>>,
    }

    impl CartPersistence for RecordingPersistence {
        fn load(&self) -> Result<Option<CartState>, CommerceError> {
            if self.load_error {
                return Err(CommerceError::Deserialization("expected value".into()));
            }
            Ok(self.stored.clone())
        }

        fn save(&self, state: &CartState) -> Result<(), CommerceError> {
            if self.fail_saves.get() {
                return Err(CommerceError::Storage("quota exceeded".into()));
            }
            self.saves.borrow_mut().push(state.clone());
            Ok(())
        }
    }

    fn product(id: i64, cents: i64) -> ProductSnapshot {
        ProductSnapshot::new(id, format!("Product {}", id), Money::new(cents))
    }

    #[test]
    fn test_open_uses_stored_state() {
        let mut stored = CartState::new();
        stored.add_item(product(1, 100), 3).unwrap();

        let store = CartStore::open(RecordingPersistence {
            stored: Some(stored.clone()),
            ..Default::default()
        });
        assert_eq!(store.state(), &stored);
    }

    #[test]
    fn test_open_recovers_from_load_error() {
        let store = CartStore::open(RecordingPersistence {
            load_error: true,
            ..Default::default()
        });
        assert!(store.state().is_empty());
        assert!(store.persistence().saves.borrow().is_empty());
    }

    #[test]
    fn test_every_dispatch_is_persisted() {
        let mut store = CartStore::open(RecordingPersistence::default());
        let id = ProductId::from(1);

        store.add_item(product(1, 250), 1).unwrap();
        store.increment_quantity(&id).unwrap();
        // No-op, still written.
        store.remove_item(&ProductId::from(9)).unwrap();

        let saves = store.persistence().saves.borrow();
        assert_eq!(saves.len(), 3);
        assert_eq!(saves.last(), Some(store.state()));
        assert_eq!(saves[1].total_amount(), Money::new(500));
    }

    #[test]
    fn test_rejected_action_is_not_persisted() {
        let mut store = CartStore::open(RecordingPersistence::default());
        assert!(store.add_item(product(1, 250), 0).is_err());
        assert!(store.persistence().saves.borrow().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let mut store = CartStore::open(RecordingPersistence::default());
        store.persistence().fail_saves.set(true);

        let result = store.add_item(product(1, 250), 2);
        assert!(matches!(result, Err(CommerceError::Storage(_))));
        assert_eq!(store.state().item_count().unwrap(), 2);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut store = CartStore::open(RecordingPersistence::default());
        let mut rx = store.subscribe();
        assert!(rx.borrow().is_empty());

        store.add_item(product(1, 250), 2).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_amount(), Money::new(500));

        // 2 -> 1 changes, 1 -> 1 does not.
        store.decrement_quantity(&ProductId::from(1)).unwrap();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.decrement_quantity(&ProductId::from(1)).unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clear_cart_is_idempotent() {
        let mut store = CartStore::open(RecordingPersistence::default());
        store.add_item(product(1, 250), 1).unwrap();

        assert!(store.clear_cart().unwrap());
        let once = store.state().clone();
        assert!(!store.clear_cart().unwrap());
        assert_eq!(store.state(), &once);
        assert!(once.is_empty());
        assert_eq!(once.total_amount(), Money::zero());
    }
}

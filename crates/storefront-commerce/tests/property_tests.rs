//! Property-based tests for the cart.

use proptest::prelude::*;
use storefront_cache::MemoryStore;
use storefront_commerce::prelude::*;

/// Ordinary prices plus negative ones and prices around the storable limit.
fn price_cents() -> impl Strategy<Value = i64> {
    prop_oneof![
        6 => 0i64..100_000,
        1 => -100_000i64..0,
        1 => (Money::MAX_CENTS - 1_000)..=(Money::MAX_CENTS + 1_000),
        1 => ((1i64 << 53) - 10)..((1i64 << 53) + 10),
    ]
}

fn quantity() -> impl Strategy<Value = i64> {
    prop_oneof![
        6 => -2i64..5,
        1 => 1i64..1_000_000,
        1 => (i64::MAX - 5)..=i64::MAX,
    ]
}

fn action() -> impl Strategy<Value = CartAction> {
    let id = (1i64..6).prop_map(ProductId::from);
    prop_oneof![
        3 => (1i64..6, price_cents(), quantity()).prop_map(|(id, cents, quantity)| {
            CartAction::AddItem {
                product: ProductSnapshot::new(id, format!("Product {}", id), Money::new(cents)),
                quantity,
            }
        }),
        1 => id.clone().prop_map(|id| CartAction::RemoveItem { id }),
        2 => id.clone().prop_map(|id| CartAction::IncrementQuantity { id }),
        2 => id.prop_map(|id| CartAction::DecrementQuantity { id }),
        1 => Just(CartAction::ClearCart),
    ]
}

fn expected_total(state: &CartState) -> i128 {
    state
        .items()
        .iter()
        .map(|i| i128::from(i.price.amount_cents) * i128::from(i.quantity))
        .sum()
}

proptest! {
    /// The total matches the items after every step of any sequence.
    #[test]
    fn prop_total_tracks_items(actions in prop::collection::vec(action(), 0..40)) {
        let mut state = CartState::new();
        for action in actions {
            let _ = state.apply(action);
            prop_assert_eq!(
                i128::from(state.total_amount().amount_cents),
                expected_total(&state)
            );
        }
    }

    /// A rejected action leaves the state exactly as it was.
    #[test]
    fn prop_rejected_actions_change_nothing(actions in prop::collection::vec(action(), 0..40)) {
        let mut state = CartState::new();
        for action in actions {
            let before = state.clone();
            if state.apply(action).is_err() {
                prop_assert_eq!(&state, &before);
            }
        }
    }

    /// Ids stay unique and quantities stay at least 1.
    #[test]
    fn prop_items_stay_valid(actions in prop::collection::vec(action(), 0..40)) {
        let mut state = CartState::new();
        for action in actions {
            let _ = state.apply(action);
        }
        let mut ids: Vec<_> = state.items().iter().map(|i| i.id.clone()).collect();
        let len = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), len);
        prop_assert!(state.items().iter().all(|i| i.quantity >= 1));
        prop_assert!(state.items().iter().all(|i| !i.price.is_negative()));
        prop_assert!(state.total_amount().amount_cents <= Money::MAX_CENTS);
        prop_assert!(state.item_count().is_ok());
    }

    /// Whatever the store reaches, a fresh session reads back the same state.
    #[test]
    fn prop_persisted_state_round_trips(actions in prop::collection::vec(action(), 0..20)) {
        let store = MemoryStore::new();
        let mut cart = CartStore::open(StoredCart::new(&store));
        for action in actions {
            let _ = cart.dispatch(action);
        }
        let reopened = CartStore::open(StoredCart::new(&store));
        prop_assert_eq!(reopened.state(), cart.state());
    }

    /// Clearing twice is the same as clearing once.
    #[test]
    fn prop_clear_is_idempotent(actions in prop::collection::vec(action(), 0..20)) {
        let mut state = CartState::new();
        for action in actions {
            let _ = state.apply(action);
        }
        state.clear();
        let once = state.clone();
        state.clear();
        prop_assert_eq!(state, once);
    }
}

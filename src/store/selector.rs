//! Derived-value subscriptions.
//!
//! A render layer rarely cares about a whole snapshot; it cares about a slice
//! of it. [`select`] watches a store and reports only when the selected slice
//! actually changes.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Reducer, Store, Subscription};

/// Live selection of a derived value from a store.
pub struct Selector<T> {
    value: Rc<RefCell<T>>,
    subscription: Subscription,
}

impl<T: Clone> Selector<T> {
    /// Latest selected value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Stop watching the store.
    pub fn unsubscribe(&self) {
        self.subscription.unsubscribe();
    }
}

/// Watch `store` through `selector`, calling `on_change(new, old)` whenever
/// the selected value differs from the last one seen.
pub fn select<S, T, F, C>(store: &Store<S>, selector: F, on_change: C) -> Selector<T>
where
    S: Reducer,
    T: PartialEq + Clone + 'static,
    F: Fn(&S) -> T + 'static,
    C: Fn(&T, &T) + 'static,
{
    let value = Rc::new(RefCell::new(selector(&store.state())));
    let cached = Rc::clone(&value);
    let subscription = store.subscribe_any(move |_, new_state, _| {
        let next = selector(new_state);
        let previous = {
            let mut current = cached.borrow_mut();
            if *current == next {
                return;
            }
            std::mem::replace(&mut *current, next.clone())
        };
        on_change(&next, &previous);
    });
    Selector {
        value,
        subscription,
    }
}

//! Synchronous reducer stores.
//!
//! A [`Store`] owns one immutable state snapshot behind an `Rc`. Dispatching
//! an action runs the state type's [`Reducer::reduce`]; when the reducer
//! hands back the very same `Rc` nothing is notified, otherwise the new
//! snapshot replaces the old one and listeners run:
//! - listeners subscribed to the action's kind, in subscription order
//! - then "any change" listeners, in subscription order
//!
//! Dispatch is re-entrant: a listener may dispatch again and that nested
//! dispatch completes, listeners included, before the outer one continues.
//! Reducers must not recurse through their own store without bound.

pub mod cell;
pub mod column;
mod column_tree;
pub mod grid;
pub mod root;
pub mod row;
mod selector;

use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::{Rc, Weak};

pub use cell::{CellAction, CellActionKind, CellState, CellStore};
pub use column::{ColumnAction, ColumnActionKind, ColumnState, ColumnStore};
pub use grid::{GridAction, GridActionKind, GridStore};
pub use root::{RootAction, RootActionKind, RootState, RootStore};
pub use row::{RowAction, RowActionKind, RowState, RowStore};
pub use selector::{select, Selector};

/// An action type with a payload-free discriminant used for subscriptions.
pub trait Action: Debug {
    type Kind: Copy + Eq + Debug + 'static;

    fn kind(&self) -> Self::Kind;
}

/// State types that know how to apply their own actions.
pub trait Reducer: Sized + 'static {
    type Action: Action + 'static;

    /// Apply `action` to `state`. Return `Rc::clone(state)` when nothing changes.
    fn reduce(state: &Rc<Self>, action: &Self::Action) -> Rc<Self>;
}

/// Listener invoked with `(action, new_state, old_state)`.
pub type Listener<S> = Rc<dyn Fn(&<S as Reducer>::Action, &Rc<S>, &Rc<S>)>;

type Kind<S> = <<S as Reducer>::Action as Action>::Kind;

struct Listeners<S: Reducer> {
    by_kind: Vec<(Kind<S>, Listener<S>)>,
    any: Vec<Listener<S>>,
}

struct Inner<S: Reducer> {
    name: &'static str,
    state: RefCell<Rc<S>>,
    listeners: RefCell<Listeners<S>>,
    dispatches: Cell<u64>,
}

/// Cheaply cloneable handle to a reducer store.
pub struct Store<S: Reducer> {
    inner: Rc<Inner<S>>,
}

impl<S: Reducer> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Reducer> Store<S> {
    pub fn new(name: &'static str, initial: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                name,
                state: RefCell::new(Rc::new(initial)),
                listeners: RefCell::new(Listeners {
                    by_kind: Vec::new(),
                    any: Vec::new(),
                }),
                dispatches: Cell::new(0),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Current snapshot.
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    /// Number of dispatches that produced a new state.
    pub fn revision(&self) -> u64 {
        self.inner.dispatches.get()
    }

    pub fn dispatch(&self, action: S::Action) {
        let old = self.state();
        let new = S::reduce(&old, &action);
        if Rc::ptr_eq(&old, &new) {
            tracing::trace!(store = self.inner.name, action = ?action.kind(), "dispatch unchanged");
            return;
        }
        tracing::trace!(store = self.inner.name, action = ?action.kind(), "dispatch");
        *self.inner.state.borrow_mut() = Rc::clone(&new);
        self.inner.dispatches.set(self.inner.dispatches.get() + 1);

        // Snapshot the lists so listeners may (un)subscribe or dispatch.
        let kind = action.kind();
        let (specific, any): (Vec<Listener<S>>, Vec<Listener<S>>) = {
            let listeners = self.inner.listeners.borrow();
            (
                listeners
                    .by_kind
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, l)| Rc::clone(l))
                    .collect(),
                listeners.any.iter().map(Rc::clone).collect(),
            )
        };
        for listener in specific.iter().chain(any.iter()) {
            listener(&action, &new, &old);
        }
    }

    /// Listen for one action kind.
    pub fn subscribe<F>(&self, kind: Kind<S>, listener: F) -> Subscription
    where
        F: Fn(&S::Action, &Rc<S>, &Rc<S>) + 'static,
    {
        self.subscribe_listener(kind, Rc::new(listener))
    }

    /// Listen for one action kind with a shared listener.
    pub fn subscribe_listener(&self, kind: Kind<S>, listener: Listener<S>) -> Subscription {
        self.inner
            .listeners
            .borrow_mut()
            .by_kind
            .push((kind, Rc::clone(&listener)));
        let weak: Weak<Inner<S>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .listeners
                    .borrow_mut()
                    .by_kind
                    .retain(|(k, l)| !(*k == kind && Rc::ptr_eq(l, &listener)));
            }
        })
    }

    /// Listen for every state change regardless of action.
    pub fn subscribe_any<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&S::Action, &Rc<S>, &Rc<S>) + 'static,
    {
        self.subscribe_any_listener(Rc::new(listener))
    }

    /// Listen for every state change with a shared listener.
    pub fn subscribe_any_listener(&self, listener: Listener<S>) -> Subscription {
        self.inner
            .listeners
            .borrow_mut()
            .any
            .push(Rc::clone(&listener));
        let weak: Weak<Inner<S>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .listeners
                    .borrow_mut()
                    .any
                    .retain(|l| !Rc::ptr_eq(l, &listener));
            }
        })
    }

    pub(crate) fn downgrade(&self) -> WeakStore<S> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Registered listener count, both kinds.
    pub fn listener_count(&self) -> usize {
        let listeners = self.inner.listeners.borrow();
        listeners.by_kind.len() + listeners.any.len()
    }
}

/// Non-owning store handle, for listeners that must read their own store.
pub(crate) struct WeakStore<S: Reducer> {
    inner: Weak<Inner<S>>,
}

impl<S: Reducer> WeakStore<S> {
    pub(crate) fn upgrade(&self) -> Option<Store<S>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

/// Handle returned by the `subscribe*` methods.
///
/// Dropping the handle keeps the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it. Unsubscribing removes every
/// registration of the same listener and is harmless to repeat.
pub struct Subscription {
    remove: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: RefCell::new(Some(Box::new(remove))),
        }
    }

    pub fn unsubscribe(&self) {
        let remove = self.remove.borrow_mut().take();
        if let Some(remove) = remove {
            remove();
        }
    }

    pub fn is_active(&self) -> bool {
        self.remove.borrow().is_some()
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

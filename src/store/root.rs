//! Aggregate of the four domain stores.
//!
//! The root store mirrors each child's latest snapshot. Every child change
//! produces a new root snapshot, so "did anything change" is a pointer
//! comparison at either level. The root only reads its children; it never
//! dispatches into them.

use std::rc::Rc;

use serde::Serialize;

use super::{
    Action, CellState, CellStore, ColumnState, ColumnStore, GridStore, Reducer, RowState,
    RowStore, Store, Subscription,
};
use crate::types::GridConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootState {
    pub grid: Rc<GridConfig>,
    pub row: Rc<RowState>,
    pub column: Rc<ColumnState>,
    pub cell: Rc<CellState>,
}

/// Carries the child snapshot to mirror.
#[derive(Debug, Clone)]
pub enum RootAction {
    Grid(Rc<GridConfig>),
    Row(Rc<RowState>),
    Column(Rc<ColumnState>),
    Cell(Rc<CellState>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootActionKind {
    Grid,
    Row,
    Column,
    Cell,
}

impl Action for RootAction {
    type Kind = RootActionKind;

    fn kind(&self) -> RootActionKind {
        match self {
            RootAction::Grid(_) => RootActionKind::Grid,
            RootAction::Row(_) => RootActionKind::Row,
            RootAction::Column(_) => RootActionKind::Column,
            RootAction::Cell(_) => RootActionKind::Cell,
        }
    }
}

impl Reducer for RootState {
    type Action = RootAction;

    fn reduce(state: &Rc<Self>, action: &RootAction) -> Rc<Self> {
        let unchanged = match action {
            RootAction::Grid(s) => Rc::ptr_eq(&state.grid, s),
            RootAction::Row(s) => Rc::ptr_eq(&state.row, s),
            RootAction::Column(s) => Rc::ptr_eq(&state.column, s),
            RootAction::Cell(s) => Rc::ptr_eq(&state.cell, s),
        };
        if unchanged {
            return Rc::clone(state);
        }
        let mut next = RootState::clone(state);
        match action {
            RootAction::Grid(s) => next.grid = Rc::clone(s),
            RootAction::Row(s) => next.row = Rc::clone(s),
            RootAction::Column(s) => next.column = Rc::clone(s),
            RootAction::Cell(s) => next.cell = Rc::clone(s),
        }
        Rc::new(next)
    }
}

/// Owns the domain stores and the aggregate that mirrors them.
pub struct RootStore {
    store: Store<RootState>,
    grid: GridStore,
    row: RowStore,
    column: ColumnStore,
    cell: CellStore,
    links: Vec<Subscription>,
}

/// Forward every change of `child` into `root` as `wrap(latest child state)`.
fn link<S: super::Reducer>(
    child: &Store<S>,
    root: &Store<RootState>,
    wrap: fn(Rc<S>) -> RootAction,
) -> Subscription {
    let weak_child = child.downgrade();
    let root = root.clone();
    child.subscribe_any(move |_, _, _| {
        // Re-read rather than trust the payload: a nested dispatch may
        // already have moved the child on.
        if let Some(child) = weak_child.upgrade() {
            root.dispatch(wrap(child.state()));
        }
    })
}

impl RootStore {
    pub fn new(grid: GridStore, row: RowStore, column: ColumnStore, cell: CellStore) -> Self {
        let store = Store::new(
            "root",
            RootState {
                grid: grid.state(),
                row: row.state(),
                column: column.state(),
                cell: cell.state(),
            },
        );
        let links = vec![
            link(grid.store(), &store, RootAction::Grid),
            link(row.store(), &store, RootAction::Row),
            link(column.store(), &store, RootAction::Column),
            link(cell.store(), &store, RootAction::Cell),
        ];
        Self {
            store,
            grid,
            row,
            column,
            cell,
            links,
        }
    }

    pub fn store(&self) -> &Store<RootState> {
        &self.store
    }

    pub fn state(&self) -> Rc<RootState> {
        self.store.state()
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn row(&self) -> &RowStore {
        &self.row
    }

    pub fn column(&self) -> &ColumnStore {
        &self.column
    }

    pub fn cell(&self) -> &CellStore {
        &self.cell
    }
}

impl Drop for RootStore {
    fn drop(&mut self) {
        for link in &self.links {
            link.unsubscribe();
        }
    }
}

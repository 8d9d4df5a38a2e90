//! Common test utilities and builders.
//!
//! Row and column fixtures shared by the store and grid tests, plus a
//! notification counter for asserting how often a store published.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::cell::Cell;
use std::rc::Rc;

use serde_json::Value;
use xlgrid::store::{Reducer, Store, Subscription};
use xlgrid::{
    ColumnDef, ColumnDefaults, ColumnGroupDef, ColumnNode, ColumnPinned, Coordinate, Grid,
    GridOptions, RowData, RowPinned,
};

// ============================================================================
// Rows
// ============================================================================

/// Ids `row_01`, `row_02`, ... for `count` rows.
pub fn row_ids(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("row_{i:02}")).collect()
}

/// Rows `row_01..` with a `c_01..c_{columns}` value of `"{row}:{col}"` each.
pub fn rows(count: usize, columns: usize) -> Vec<RowData> {
    row_ids(count)
        .into_iter()
        .map(|id| {
            (1..=columns).fold(RowData::new(id.clone()), |row, c| {
                let field = format!("c_{c:02}");
                let value = format!("{id}:{field}");
                row.with_value(field, value)
            })
        })
        .collect()
}

pub fn row(id: &str) -> RowData {
    RowData::new(id).with_value("name", id)
}

pub fn pinned_row(id: &str, pinned: RowPinned) -> RowData {
    row(id).pinned(pinned)
}

pub fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| (*s).to_string()).collect()
}

// ============================================================================
// Columns
// ============================================================================

/// Plain columns `c_01..c_{count}`.
pub fn columns(count: usize) -> Vec<ColumnNode> {
    (1..=count)
        .map(|c| ColumnDef::new(format!("c_{c:02}")).into())
        .collect()
}

pub fn col(field: &str) -> ColumnNode {
    ColumnDef::new(field).into()
}

pub fn pinned_col(field: &str, pinned: ColumnPinned) -> ColumnNode {
    ColumnDef::new(field).pinned(pinned).into()
}

pub fn group(id: &str, children: Vec<ColumnNode>) -> ColumnNode {
    ColumnGroupDef::new(id, children).header(id).into()
}

pub fn collapsed_group(id: &str, children: Vec<ColumnNode>) -> ColumnNode {
    ColumnGroupDef::new(id, children)
        .header(id)
        .collapsed(true)
        .into()
}

// ============================================================================
// Grid
// ============================================================================

/// A grid of `rows × columns` filled by [`rows`].
pub fn grid(row_count: usize, column_count: usize) -> Grid {
    Grid::new(GridOptions {
        columns: columns(column_count),
        default_column_options: ColumnDefaults::default(),
        rows: rows(row_count, column_count),
        ..GridOptions::default()
    })
}

pub fn coord(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

pub fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

// ============================================================================
// Notifications
// ============================================================================

/// Counts any-change notifications of a store.
pub struct Counter {
    count: Rc<Cell<usize>>,
    subscription: Subscription,
}

impl Counter {
    pub fn any<S: Reducer>(store: &Store<S>) -> Self {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let subscription = store.subscribe_any(move |_, _, _| seen.set(seen.get() + 1));
        Self {
            count,
            subscription,
        }
    }

    pub fn kind<S: Reducer>(
        store: &Store<S>,
        kind: <<S as Reducer>::Action as xlgrid::store::Action>::Kind,
    ) -> Self {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let subscription = store.subscribe(kind, move |_, _, _| seen.set(seen.get() + 1));
        Self {
            count,
            subscription,
        }
    }

    pub fn get(&self) -> usize {
        self.count.get()
    }
}

impl Drop for Counter {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

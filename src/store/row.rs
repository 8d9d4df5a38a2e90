//! Row data, ordering and pinning.
//!
//! Rows live in three ordered id lists (pinned top, normal, pinned bottom).
//! The backing `rows` vector is always their concatenation, so a row's
//! position in it is its global row index.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use super::{Action, Reducer, Store};
use crate::types::{RowData, RowPinned};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowState {
    /// Row data in global order.
    pub rows: Vec<RowData>,
    /// Row id → index into `rows`, which is also the row's global index.
    pub row_index: HashMap<String, usize>,
    pub pinned_top: Vec<String>,
    pub normal: Vec<String>,
    pub pinned_bottom: Vec<String>,
    pub hovered: Option<String>,
    pub selected: Vec<String>,
}

impl RowState {
    /// Build a state from rows in order, filing each by its `pinned` flag.
    /// A repeated id overwrites the earlier row's data in place.
    pub fn from_rows(rows: Vec<RowData>) -> Self {
        let mut by_id: HashMap<String, RowData> = HashMap::with_capacity(rows.len());
        let (mut top, mut normal, mut bottom) = (Vec::new(), Vec::new(), Vec::new());
        for row in rows {
            if let Some(existing) = by_id.get_mut(&row.id) {
                existing.data = row.data;
                continue;
            }
            match row.pinned {
                Some(RowPinned::Top) => top.push(row.id.clone()),
                Some(RowPinned::Bottom) => bottom.push(row.id.clone()),
                None => normal.push(row.id.clone()),
            }
            by_id.insert(row.id.clone(), row);
        }
        Self::assemble(by_id, top, normal, bottom, None, Vec::new())
    }

    /// Rebuild `rows` and `row_index` from the three lists.
    fn assemble(
        mut by_id: HashMap<String, RowData>,
        pinned_top: Vec<String>,
        normal: Vec<String>,
        pinned_bottom: Vec<String>,
        hovered: Option<String>,
        selected: Vec<String>,
    ) -> Self {
        let mut rows = Vec::with_capacity(pinned_top.len() + normal.len() + pinned_bottom.len());
        let segments = [
            (&pinned_top, Some(RowPinned::Top)),
            (&normal, None),
            (&pinned_bottom, Some(RowPinned::Bottom)),
        ];
        for (ids, pinned) in segments {
            for id in ids {
                if let Some(mut row) = by_id.remove(id) {
                    row.pinned = pinned;
                    rows.push(row);
                }
            }
        }
        let row_index = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.id.clone(), i))
            .collect();
        Self {
            rows,
            row_index,
            pinned_top,
            normal,
            pinned_bottom,
            hovered,
            selected,
        }
    }

    fn into_parts(self) -> (HashMap<String, RowData>, Vec<String>, Vec<String>, Vec<String>) {
        let by_id = self
            .rows
            .into_iter()
            .map(|row| (row.id.clone(), row))
            .collect();
        (by_id, self.pinned_top, self.normal, self.pinned_bottom)
    }

    pub fn row_count(&self) -> usize {
        self.pinned_top.len() + self.normal.len() + self.pinned_bottom.len()
    }

    pub fn has_row(&self, id: &str) -> bool {
        self.row_index.contains_key(id)
    }

    pub fn row(&self, id: &str) -> Option<&RowData> {
        self.row_index.get(id).and_then(|&i| self.rows.get(i))
    }

    pub fn cell_value(&self, id: &str, field: &str) -> Option<&Value> {
        self.row(id).and_then(|row| row.value(field))
    }

    /// Row id at a global index: pinned top, then normal, then pinned bottom.
    pub fn row_id_by_index(&self, index: usize) -> Option<&str> {
        let top = self.pinned_top.len();
        let normal = self.normal.len();
        let id = if index < top {
            self.pinned_top.get(index)
        } else if index < top + normal {
            self.normal.get(index - top)
        } else {
            self.pinned_bottom.get(index - top - normal)
        };
        id.map(String::as_str)
    }

    /// Global index of a row, resolved in the same order as
    /// [`row_id_by_index`](Self::row_id_by_index).
    pub fn row_global_index(&self, id: &str) -> Option<usize> {
        self.row_index.get(id).copied()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|r| r == id)
    }
}

#[derive(Debug, Clone)]
pub enum RowAction {
    /// Replace every row.
    SetRows(Vec<RowData>),
    /// Insert rows before a global index; known ids overwrite data in place.
    AppendRowsBefore { index: usize, rows: Vec<RowData> },
    /// Remove rows by id; unknown ids are ignored.
    TakeRows(Vec<String>),
    SetCellValue {
        row_id: String,
        field: String,
        value: Value,
        force: bool,
    },
    SetHoveredRow(Option<String>),
    SelectRows(Vec<String>),
    SetPinnedTopRows(Vec<String>),
    SetPinnedBottomRows(Vec<String>),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowActionKind {
    SetRows,
    AppendRowsBefore,
    TakeRows,
    SetCellValue,
    SetHoveredRow,
    SelectRows,
    SetPinnedTopRows,
    SetPinnedBottomRows,
    Clear,
}

impl Action for RowAction {
    type Kind = RowActionKind;

    fn kind(&self) -> RowActionKind {
        match self {
            RowAction::SetRows(_) => RowActionKind::SetRows,
            RowAction::AppendRowsBefore { .. } => RowActionKind::AppendRowsBefore,
            RowAction::TakeRows(_) => RowActionKind::TakeRows,
            RowAction::SetCellValue { .. } => RowActionKind::SetCellValue,
            RowAction::SetHoveredRow(_) => RowActionKind::SetHoveredRow,
            RowAction::SelectRows(_) => RowActionKind::SelectRows,
            RowAction::SetPinnedTopRows(_) => RowActionKind::SetPinnedTopRows,
            RowAction::SetPinnedBottomRows(_) => RowActionKind::SetPinnedBottomRows,
            RowAction::Clear => RowActionKind::Clear,
        }
    }
}

impl Reducer for RowState {
    type Action = RowAction;

    fn reduce(state: &Rc<Self>, action: &RowAction) -> Rc<Self> {
        match action {
            RowAction::SetRows(rows) => {
                let next = RowState::from_rows(rows.clone());
                if next == **state {
                    Rc::clone(state)
                } else {
                    Rc::new(next)
                }
            }
            RowAction::AppendRowsBefore { index, rows } => append_rows_before(state, *index, rows),
            RowAction::TakeRows(ids) => take_rows(state, ids),
            RowAction::SetCellValue {
                row_id,
                field,
                value,
                force,
            } => set_cell_value(state, row_id, field, value, *force),
            RowAction::SetHoveredRow(id) => {
                let unknown = id.as_deref().is_some_and(|id| !state.has_row(id));
                if unknown || state.hovered == *id {
                    return Rc::clone(state);
                }
                let mut next = RowState::clone(state);
                next.hovered.clone_from(id);
                Rc::new(next)
            }
            RowAction::SelectRows(ids) => {
                let mut seen = HashSet::new();
                let selected: Vec<String> = ids
                    .iter()
                    .filter(|id| state.has_row(id) && seen.insert(id.as_str()))
                    .cloned()
                    .collect();
                if selected == state.selected {
                    return Rc::clone(state);
                }
                let mut next = RowState::clone(state);
                next.selected = selected;
                Rc::new(next)
            }
            RowAction::SetPinnedTopRows(ids) => pin_rows(state, ids, RowPinned::Top),
            RowAction::SetPinnedBottomRows(ids) => pin_rows(state, ids, RowPinned::Bottom),
            RowAction::Clear => {
                if **state == RowState::default() {
                    Rc::clone(state)
                } else {
                    Rc::new(RowState::default())
                }
            }
        }
    }
}

fn append_rows_before(state: &Rc<RowState>, index: usize, rows: &[RowData]) -> Rc<RowState> {
    let mut overwritten = false;
    let mut inserted = false;
    let (mut by_id, mut top, mut normal, mut bottom) = RowState::clone(state).into_parts();
    let mut cursor = index;

    for row in rows {
        if let Some(existing) = by_id.get_mut(&row.id) {
            if existing.data != row.data {
                existing.data.clone_from(&row.data);
                overwritten = true;
            }
            continue;
        }
        let (list, offset) = match row.pinned {
            Some(RowPinned::Top) => (&mut top, 0),
            None => {
                let offset = top.len();
                (&mut normal, offset)
            }
            Some(RowPinned::Bottom) => {
                let offset = top.len() + normal.len();
                (&mut bottom, offset)
            }
        };
        let local = cursor.saturating_sub(offset).min(list.len());
        list.insert(local, row.id.clone());
        cursor = offset + local + 1;
        by_id.insert(row.id.clone(), row.clone());
        inserted = true;
    }

    if !overwritten && !inserted {
        return Rc::clone(state);
    }
    Rc::new(RowState::assemble(
        by_id,
        top,
        normal,
        bottom,
        state.hovered.clone(),
        state.selected.clone(),
    ))
}

fn take_rows(state: &Rc<RowState>, ids: &[String]) -> Rc<RowState> {
    let doomed: HashSet<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| state.has_row(id))
        .collect();
    if doomed.is_empty() {
        return Rc::clone(state);
    }
    let keep = |list: &[String]| -> Vec<String> {
        list.iter()
            .filter(|id| !doomed.contains(id.as_str()))
            .cloned()
            .collect()
    };
    let (by_id, top, normal, bottom) = RowState::clone(state).into_parts();
    let hovered = state
        .hovered
        .clone()
        .filter(|id| !doomed.contains(id.as_str()));
    Rc::new(RowState::assemble(
        by_id,
        keep(&top),
        keep(&normal),
        keep(&bottom),
        hovered,
        keep(&state.selected),
    ))
}

fn set_cell_value(
    state: &Rc<RowState>,
    row_id: &str,
    field: &str,
    value: &Value,
    force: bool,
) -> Rc<RowState> {
    let Some(&index) = state.row_index.get(row_id) else {
        tracing::debug!(row_id, field, "set_cell_value on unknown row ignored");
        return Rc::clone(state);
    };
    if !force && state.cell_value(row_id, field) == Some(value) {
        return Rc::clone(state);
    }
    let mut next = RowState::clone(state);
    if let Some(row) = next.rows.get_mut(index) {
        row.data.insert(field.to_string(), value.clone());
    }
    Rc::new(next)
}

/// Pin the listed known rows to one edge, in the given order.
///
/// Rows previously pinned to that edge but not listed return to the start of
/// the normal segment. Listing any known row always publishes a new snapshot
/// so pin consumers can recompute.
fn pin_rows(state: &Rc<RowState>, ids: &[String], edge: RowPinned) -> Rc<RowState> {
    let mut seen = HashSet::new();
    let pinned: Vec<String> = ids
        .iter()
        .filter(|id| state.has_row(id) && seen.insert(id.as_str()))
        .cloned()
        .collect();
    let current = match edge {
        RowPinned::Top => &state.pinned_top,
        RowPinned::Bottom => &state.pinned_bottom,
    };
    if pinned.is_empty() && current.is_empty() {
        return Rc::clone(state);
    }

    let (by_id, top, normal, bottom) = RowState::clone(state).into_parts();
    let listed: HashSet<&str> = pinned.iter().map(String::as_str).collect();
    let strip = |list: Vec<String>| -> Vec<String> {
        list.into_iter()
            .filter(|id| !listed.contains(id.as_str()))
            .collect()
    };
    let (released, other) = match edge {
        RowPinned::Top => (strip(top), strip(bottom)),
        RowPinned::Bottom => (strip(bottom), strip(top)),
    };
    let normal: Vec<String> = released.into_iter().chain(strip(normal)).collect();
    let (top, bottom) = match edge {
        RowPinned::Top => (pinned, other),
        RowPinned::Bottom => (other, pinned),
    };
    Rc::new(RowState::assemble(
        by_id,
        top,
        normal,
        bottom,
        state.hovered.clone(),
        state.selected.clone(),
    ))
}

/// Store of [`RowState`] with the row operations the grid calls.
#[derive(Clone)]
pub struct RowStore {
    store: Store<RowState>,
}

impl RowStore {
    pub fn new(rows: Vec<RowData>) -> Self {
        Self {
            store: Store::new("row", RowState::from_rows(rows)),
        }
    }

    pub fn store(&self) -> &Store<RowState> {
        &self.store
    }

    pub fn state(&self) -> Rc<RowState> {
        self.store.state()
    }

    pub fn set_rows(&self, rows: Vec<RowData>) {
        self.store.dispatch(RowAction::SetRows(rows));
    }

    /// Insert rows before a global index and broadcast any new pins.
    pub fn append_rows_before(&self, index: usize, rows: Vec<RowData>) {
        let before = self.state();
        let mut new_top = false;
        let mut new_bottom = false;
        for row in rows.iter().filter(|row| !before.has_row(&row.id)) {
            match row.pinned {
                Some(RowPinned::Top) => new_top = true,
                Some(RowPinned::Bottom) => new_bottom = true,
                None => {}
            }
        }
        self.store
            .dispatch(RowAction::AppendRowsBefore { index, rows });
        if new_top {
            let top = self.state().pinned_top.clone();
            self.store.dispatch(RowAction::SetPinnedTopRows(top));
        }
        if new_bottom {
            let bottom = self.state().pinned_bottom.clone();
            self.store.dispatch(RowAction::SetPinnedBottomRows(bottom));
        }
    }

    pub fn take_rows(&self, ids: Vec<String>) {
        self.store.dispatch(RowAction::TakeRows(ids));
    }

    pub fn set_cell_value(&self, row_id: &str, field: &str, value: Value, force: bool) {
        self.store.dispatch(RowAction::SetCellValue {
            row_id: row_id.to_string(),
            field: field.to_string(),
            value,
            force,
        });
    }

    pub fn set_hovered_row(&self, id: Option<String>) {
        self.store.dispatch(RowAction::SetHoveredRow(id));
    }

    pub fn select_rows(&self, ids: Vec<String>) {
        self.store.dispatch(RowAction::SelectRows(ids));
    }

    pub fn set_pinned_top_rows(&self, ids: Vec<String>) {
        self.store.dispatch(RowAction::SetPinnedTopRows(ids));
    }

    pub fn set_pinned_bottom_rows(&self, ids: Vec<String>) {
        self.store.dispatch(RowAction::SetPinnedBottomRows(ids));
    }

    pub fn clear(&self) {
        self.store.dispatch(RowAction::Clear);
    }
}

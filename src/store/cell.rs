//! Selection, editing and fill state.

use std::rc::Rc;

use serde::Serialize;

use super::{Action, Reducer, Store};
use crate::range::{CellRange, FillRange, Range};
use crate::types::{CellPosition, Coordinate};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellState {
    pub selections: Vec<CellRange>,
    pub editing: Option<CellPosition>,
    pub filling: Option<FillRange>,
}

impl CellState {
    /// First selection (by insertion order) containing `coord`.
    pub fn coord_located_range(&self, coord: Coordinate) -> Option<&CellRange> {
        self.selections.iter().find(|range| range.contains(coord))
    }

    /// The selection new fills extend from.
    pub fn primary_selection(&self) -> Option<&CellRange> {
        self.selections.first()
    }
}

#[derive(Debug, Clone)]
pub enum CellAction {
    /// Replace the selection with one range, or clear it with `None`.
    SelectCells(Option<(Coordinate, Coordinate)>),
    SetEditing(Option<CellPosition>),
    SetFilling(Option<FillRange>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellActionKind {
    SelectCells,
    SetEditing,
    SetFilling,
}

impl Action for CellAction {
    type Kind = CellActionKind;

    fn kind(&self) -> CellActionKind {
        match self {
            CellAction::SelectCells(_) => CellActionKind::SelectCells,
            CellAction::SetEditing(_) => CellActionKind::SetEditing,
            CellAction::SetFilling(_) => CellActionKind::SetFilling,
        }
    }
}

impl Reducer for CellState {
    type Action = CellAction;

    fn reduce(state: &Rc<Self>, action: &CellAction) -> Rc<Self> {
        match action {
            CellAction::SelectCells(corners) => {
                let selections = match corners {
                    Some((start, end)) => vec![CellRange::from_coords(*start, *end)],
                    None => Vec::new(),
                };
                if selections == state.selections {
                    return Rc::clone(state);
                }
                let mut next = CellState::clone(state);
                next.selections = selections;
                Rc::new(next)
            }
            CellAction::SetEditing(position) => {
                if state.editing == *position {
                    return Rc::clone(state);
                }
                let mut next = CellState::clone(state);
                next.editing.clone_from(position);
                Rc::new(next)
            }
            CellAction::SetFilling(range) => {
                if state.filling == *range {
                    return Rc::clone(state);
                }
                let mut next = CellState::clone(state);
                next.filling = *range;
                Rc::new(next)
            }
        }
    }
}

/// Store of [`CellState`].
#[derive(Clone)]
pub struct CellStore {
    store: Store<CellState>,
}

impl Default for CellStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CellStore {
    pub fn new() -> Self {
        Self {
            store: Store::new("cell", CellState::default()),
        }
    }

    pub fn store(&self) -> &Store<CellState> {
        &self.store
    }

    pub fn state(&self) -> Rc<CellState> {
        self.store.state()
    }

    pub fn select_cells(&self, start: Coordinate, end: Coordinate) {
        self.store
            .dispatch(CellAction::SelectCells(Some((start, end))));
    }

    pub fn clear_selection(&self) {
        self.store.dispatch(CellAction::SelectCells(None));
    }

    pub fn set_editing(&self, position: Option<CellPosition>) {
        self.store.dispatch(CellAction::SetEditing(position));
    }

    pub fn set_filling(&self, range: Option<FillRange>) {
        self.store.dispatch(CellAction::SetFilling(range));
    }

    pub fn coord_located_range(&self, coord: Coordinate) -> Option<CellRange> {
        self.state().coord_located_range(coord).copied()
    }
}

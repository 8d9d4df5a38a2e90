//! Column definitions, ordering, pinning and grouping.
//!
//! The three ordered lists hold visible columns only, so a field's position
//! in pinned left, then normal, then pinned right is its `x` coordinate.
//! They are always re-derived from `order` and `options` rather than edited
//! in place.

use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use super::column_tree::{
    apply_visibility, enclosing_groups, group_end, normalize, reorder_groups, split_pinned,
};
use super::{Action, Reducer, Store};
use crate::types::{ColumnDefaults, ColumnNode, ColumnOptions, ColumnPinned, GroupData};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnState {
    /// Every leaf field in declaration order, hidden ones included.
    pub order: Vec<String>,
    pub pinned_left: Vec<String>,
    pub normal: Vec<String>,
    pub pinned_right: Vec<String>,
    /// Visible field → `x` coordinate.
    #[serde(skip)]
    pub column_index: HashMap<String, usize>,
    pub options: HashMap<String, ColumnOptions>,
    /// Group ids per header depth, outermost first.
    pub groups: Vec<Vec<String>>,
    pub groups_data: HashMap<String, GroupData>,
    pub defaults: ColumnDefaults,
}

fn index_visible(left: &[String], normal: &[String], right: &[String]) -> HashMap<String, usize> {
    left.iter()
        .chain(normal)
        .chain(right)
        .enumerate()
        .map(|(i, field)| (field.clone(), i))
        .collect()
}

impl ColumnState {
    pub fn from_columns(columns: &[ColumnNode], defaults: ColumnDefaults) -> Self {
        let flat = normalize(columns, &defaults);
        let (pinned_left, normal, pinned_right) = split_pinned(&flat.order, &flat.options);
        let column_index = index_visible(&pinned_left, &normal, &pinned_right);
        Self {
            order: flat.order,
            pinned_left,
            normal,
            pinned_right,
            column_index,
            options: flat.options,
            groups: flat.groups,
            groups_data: flat.groups_data,
            defaults,
        }
    }

    /// Recompute visibility and the pinned/normal split.
    fn rederive(mut self) -> Self {
        apply_visibility(&mut self.options, &self.groups_data);
        let (left, normal, right) = split_pinned(&self.order, &self.options);
        self.column_index = index_visible(&left, &normal, &right);
        self.pinned_left = left;
        self.normal = normal;
        self.pinned_right = right;
        self
    }

    /// Visible column count.
    pub fn column_count(&self) -> usize {
        self.pinned_left.len() + self.normal.len() + self.pinned_right.len()
    }

    pub fn options(&self, field: &str) -> Option<&ColumnOptions> {
        self.options.get(field)
    }

    pub fn group(&self, group_id: &str) -> Option<&GroupData> {
        self.groups_data.get(group_id)
    }

    /// Field at a visible column index: pinned left, then normal, then pinned right.
    pub fn field_by_index(&self, index: usize) -> Option<&str> {
        let left = self.pinned_left.len();
        let normal = self.normal.len();
        let field = if index < left {
            self.pinned_left.get(index)
        } else if index < left + normal {
            self.normal.get(index - left)
        } else {
            self.pinned_right.get(index - left - normal)
        };
        field.map(String::as_str)
    }

    /// Visible column index of a field, `None` when unknown or hidden.
    pub fn column_global_index(&self, field: &str) -> Option<usize> {
        self.column_index.get(field).copied()
    }

    /// Visible fields in coordinate order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &str> {
        self.pinned_left
            .iter()
            .chain(&self.normal)
            .chain(&self.pinned_right)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub enum ColumnAction {
    /// Replace every column.
    SetColumns {
        columns: Vec<ColumnNode>,
        defaults: ColumnDefaults,
    },
    UpdateColumnPinned {
        field: String,
        pinned: Option<ColumnPinned>,
    },
    UpdateColumnWidth {
        field: String,
        width: u32,
    },
    UpdateGroupCollapsed {
        group_id: String,
        collapsed: bool,
    },
    /// Move a column before another one sharing its groups, or to the end of
    /// its innermost group when `before` is `None`. Columns never change
    /// group, so a move across group borders is ignored.
    MoveColumn {
        field: String,
        before: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnActionKind {
    SetColumns,
    UpdateColumnPinned,
    UpdateColumnWidth,
    UpdateGroupCollapsed,
    MoveColumn,
}

impl Action for ColumnAction {
    type Kind = ColumnActionKind;

    fn kind(&self) -> ColumnActionKind {
        match self {
            ColumnAction::SetColumns { .. } => ColumnActionKind::SetColumns,
            ColumnAction::UpdateColumnPinned { .. } => ColumnActionKind::UpdateColumnPinned,
            ColumnAction::UpdateColumnWidth { .. } => ColumnActionKind::UpdateColumnWidth,
            ColumnAction::UpdateGroupCollapsed { .. } => ColumnActionKind::UpdateGroupCollapsed,
            ColumnAction::MoveColumn { .. } => ColumnActionKind::MoveColumn,
        }
    }
}

impl Reducer for ColumnState {
    type Action = ColumnAction;

    fn reduce(state: &Rc<Self>, action: &ColumnAction) -> Rc<Self> {
        match action {
            ColumnAction::SetColumns { columns, defaults } => {
                let next = ColumnState::from_columns(columns, defaults.clone());
                if next == **state {
                    Rc::clone(state)
                } else {
                    Rc::new(next)
                }
            }
            ColumnAction::UpdateColumnPinned { field, pinned } => {
                match state.options.get(field) {
                    Some(column) if column.pinned != *pinned => {}
                    _ => return Rc::clone(state),
                }
                let mut next = ColumnState::clone(state);
                if let Some(column) = next.options.get_mut(field) {
                    column.pinned = *pinned;
                }
                Rc::new(next.rederive())
            }
            ColumnAction::UpdateColumnWidth { field, width } => {
                match state.options.get(field) {
                    Some(column) if column.width != *width => {}
                    _ => return Rc::clone(state),
                }
                let mut next = ColumnState::clone(state);
                if let Some(column) = next.options.get_mut(field) {
                    column.width = *width;
                }
                Rc::new(next)
            }
            ColumnAction::UpdateGroupCollapsed {
                group_id,
                collapsed,
            } => {
                match state.groups_data.get(group_id) {
                    Some(group) if group.collapsed != *collapsed => {}
                    _ => return Rc::clone(state),
                }
                let mut next = ColumnState::clone(state);
                if let Some(group) = next.groups_data.get_mut(group_id) {
                    group.collapsed = *collapsed;
                }
                Rc::new(next.rederive())
            }
            ColumnAction::MoveColumn { field, before } => {
                let Some(from) = state.order.iter().position(|f| f == field) else {
                    return Rc::clone(state);
                };
                let mut order = state.order.clone();
                let moved = order.remove(from);
                let to = match before {
                    Some(before) => {
                        let same_groups = enclosing_groups(&state.groups_data, field)
                            == enclosing_groups(&state.groups_data, before);
                        match order.iter().position(|f| f == before) {
                            Some(to) if same_groups => to,
                            _ => {
                                tracing::debug!(%field, %before, "column move ignored");
                                return Rc::clone(state);
                            }
                        }
                    }
                    None => group_end(&order, &state.groups_data, field),
                };
                order.insert(to, moved);
                if order == state.order {
                    return Rc::clone(state);
                }
                let mut next = ColumnState::clone(state);
                reorder_groups(&order, &mut next.groups, &mut next.groups_data);
                next.order = order;
                Rc::new(next.rederive())
            }
        }
    }
}

/// Store of [`ColumnState`].
#[derive(Clone)]
pub struct ColumnStore {
    store: Store<ColumnState>,
}

impl ColumnStore {
    pub fn new(columns: &[ColumnNode], defaults: ColumnDefaults) -> Self {
        Self {
            store: Store::new("column", ColumnState::from_columns(columns, defaults)),
        }
    }

    pub fn store(&self) -> &Store<ColumnState> {
        &self.store
    }

    pub fn state(&self) -> Rc<ColumnState> {
        self.store.state()
    }

    pub fn set_columns(&self, columns: Vec<ColumnNode>, defaults: ColumnDefaults) {
        self.store
            .dispatch(ColumnAction::SetColumns { columns, defaults });
    }

    pub fn update_column_pinned(&self, field: &str, pinned: Option<ColumnPinned>) {
        self.store.dispatch(ColumnAction::UpdateColumnPinned {
            field: field.to_string(),
            pinned,
        });
    }

    pub fn update_column_width(&self, field: &str, width: u32) {
        self.store.dispatch(ColumnAction::UpdateColumnWidth {
            field: field.to_string(),
            width,
        });
    }

    pub fn update_group_collapsed(&self, group_id: &str, collapsed: bool) {
        self.store.dispatch(ColumnAction::UpdateGroupCollapsed {
            group_id: group_id.to_string(),
            collapsed,
        });
    }

    pub fn move_column(&self, field: &str, before: Option<&str>) {
        self.store.dispatch(ColumnAction::MoveColumn {
            field: field.to_string(),
            before: before.map(str::to_string),
        });
    }
}

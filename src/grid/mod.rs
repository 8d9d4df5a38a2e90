//! The grid facade.
//!
//! `Grid` is the only thing the render layer mutates. It translates
//! semantic operations (set a cell, select a range, drag the fill handle)
//! into store dispatches and does the coordinate math that spans stores:
//! a coordinate's `y` comes from the row store, its `x` from the column store.
//!
//! Every operation here is infallible. Unknown rows, fields and coordinates
//! are ignored; only the clipboard methods return errors.

mod clipboard;
mod fill;

use std::rc::Rc;

use serde_json::Value;

use crate::range::Range;
use crate::store::{CellStore, ColumnStore, GridStore, RootState, RootStore, RowStore};
use crate::types::{
    Boundary, CellPosition, ColumnDefaults, ColumnNode, ColumnPinned, ContextMenuItem,
    ContextMenuProvider, ContextMenuTarget, Coordinate, FillLimit, GridConfig, GridOptions,
    RowData,
};

pub use clipboard::{parse_clipboard_text, Clipboard, MemoryClipboard};

/// Spreadsheet-style grid state and the operations over it.
pub struct Grid {
    root: RootStore,
    clipboard: Option<Rc<dyn Clipboard>>,
}

fn to_coord(index: usize) -> Option<i32> {
    i32::try_from(index).ok()
}

fn to_index(coord: i32) -> Option<usize> {
    usize::try_from(coord).ok()
}

impl Grid {
    /// Create a grid without clipboard access.
    pub fn new(options: GridOptions) -> Self {
        let GridOptions {
            columns,
            default_column_options,
            rows,
            ..
        } = &options;
        let grid = GridStore::new(GridConfig::from_options(&options));
        let row = RowStore::new(rows.clone());
        let column = ColumnStore::new(columns, default_column_options.clone());
        let cell = CellStore::new();
        tracing::debug!(
            rows = rows.len(),
            columns = column.state().column_count(),
            "grid created"
        );
        Self {
            root: RootStore::new(grid, row, column, cell),
            clipboard: None,
        }
    }

    /// Create a grid that copies to and pastes from `clipboard`.
    pub fn with_clipboard(options: GridOptions, clipboard: Rc<dyn Clipboard>) -> Self {
        let mut grid = Self::new(options);
        grid.clipboard = Some(clipboard);
        grid
    }

    pub fn set_clipboard(&mut self, clipboard: Option<Rc<dyn Clipboard>>) {
        self.clipboard = clipboard;
    }

    pub fn root(&self) -> &RootStore {
        &self.root
    }

    /// Aggregate snapshot of every domain store.
    pub fn state(&self) -> Rc<RootState> {
        self.root.state()
    }

    pub fn grid_store(&self) -> &GridStore {
        self.root.grid()
    }

    pub fn row_store(&self) -> &RowStore {
        self.root.row()
    }

    pub fn column_store(&self) -> &ColumnStore {
        self.root.column()
    }

    pub fn cell_store(&self) -> &CellStore {
        self.root.cell()
    }

    // ---- Coordinates ----

    /// Visible position of a cell, or [`Coordinate::NONE`] when the row or
    /// column is unknown.
    pub fn get_coordinate(&self, row_id: &str, field: &str) -> Coordinate {
        let y = self
            .row_store()
            .state()
            .row_global_index(row_id)
            .and_then(to_coord);
        let x = self
            .column_store()
            .state()
            .column_global_index(field)
            .and_then(to_coord);
        match (x, y) {
            (Some(x), Some(y)) => Coordinate::new(x, y),
            _ => Coordinate::NONE,
        }
    }

    /// Row id at a visible row index.
    pub fn row_id_at(&self, y: i32) -> Option<String> {
        let index = to_index(y)?;
        self.row_store()
            .state()
            .row_id_by_index(index)
            .map(str::to_string)
    }

    /// Column field at a visible column index.
    pub fn field_at(&self, x: i32) -> Option<String> {
        let index = to_index(x)?;
        self.column_store()
            .state()
            .field_by_index(index)
            .map(str::to_string)
    }

    /// Row id and field addressed by a coordinate.
    pub fn resolve(&self, coord: Coordinate) -> Option<(String, String)> {
        Some((self.row_id_at(coord.y)?, self.field_at(coord.x)?))
    }

    pub fn row_count(&self) -> usize {
        self.row_store().state().row_count()
    }

    pub fn column_count(&self) -> usize {
        self.column_store().state().column_count()
    }

    // ---- Values ----

    /// Stored value without the column's transformer applied.
    pub fn get_raw_value(&self, row_id: &str, field: &str) -> Option<Value> {
        self.row_store().state().cell_value(row_id, field).cloned()
    }

    /// Display value: the column's `format` applied to the stored value.
    pub fn get_cell_value(&self, row_id: &str, field: &str) -> Option<Value> {
        let raw = self.get_raw_value(row_id, field)?;
        let column = self.column_store().state();
        match column.options(field).and_then(|c| c.transformer.as_ref()) {
            Some(transformer) => Some(transformer.format(&raw)),
            None => Some(raw),
        }
    }

    /// Store a value through the column's `parse`.
    ///
    /// Ignored when the cell has no stored value yet (unknown row or field,
    /// or a row that never had this field).
    pub fn set_cell_value(&self, row_id: &str, field: &str, value: Value) {
        if self.get_raw_value(row_id, field).is_none() {
            tracing::debug!(row_id, field, "set_cell_value on undefined cell ignored");
            return;
        }
        let column = self.column_store().state();
        let raw = match column.options(field).and_then(|c| c.transformer.as_ref()) {
            Some(transformer) => transformer.parse(&value),
            None => value,
        };
        self.row_store().set_cell_value(row_id, field, raw, false);
    }

    pub fn get_cell_value_by_coord(&self, coord: Coordinate) -> Option<Value> {
        let (row_id, field) = self.resolve(coord)?;
        self.get_cell_value(&row_id, &field)
    }

    pub fn set_cell_value_by_coord(&self, coord: Coordinate, value: Value) {
        match self.resolve(coord) {
            Some((row_id, field)) => self.set_cell_value(&row_id, &field, value),
            None => tracing::debug!(x = coord.x, y = coord.y, "set on unresolved coordinate ignored"),
        }
    }

    // ---- Selection ----

    pub fn select_cells(&self, start: Coordinate, end: Coordinate) {
        self.cell_store().select_cells(start, end);
    }

    pub fn clear_selection(&self) {
        self.cell_store().clear_selection();
    }

    /// Edges of the selection containing `coord`, `None` when unselected.
    pub fn get_select_boundary(&self, coord: Coordinate) -> Option<Boundary> {
        self.cell_store()
            .state()
            .coord_located_range(coord)
            .and_then(|range| range.boundary(coord))
    }

    /// Edges of the active fill strip at `coord`, `None` when outside it.
    pub fn get_filling_boundary(&self, coord: Coordinate) -> Option<Boundary> {
        self.cell_store()
            .state()
            .filling
            .as_ref()
            .and_then(|range| range.boundary(coord))
    }

    pub fn is_selected(&self, coord: Coordinate) -> bool {
        self.cell_store()
            .state()
            .coord_located_range(coord)
            .is_some()
    }

    // ---- Editing ----

    /// Start editing a cell. Ignored for unknown cells and read-only columns.
    pub fn start_editing(&self, row_id: &str, field: &str) {
        let editable = self
            .column_store()
            .state()
            .options(field)
            .is_some_and(|c| c.editable);
        if !editable || !self.row_store().state().has_row(row_id) {
            tracing::debug!(row_id, field, "start_editing ignored");
            return;
        }
        self.cell_store()
            .set_editing(Some(CellPosition::new(row_id, field)));
    }

    /// Commit `value` to the cell being edited and stop editing.
    pub fn commit_editing(&self, value: Value) {
        if let Some(position) = self.cell_store().state().editing.clone() {
            self.set_cell_value(&position.row_id, &position.field, value);
        }
        self.stop_editing();
    }

    pub fn stop_editing(&self) {
        self.cell_store().set_editing(None);
    }

    pub fn editing(&self) -> Option<CellPosition> {
        self.cell_store().state().editing.clone()
    }

    // ---- Context menu ----

    /// Items the host's provider offers for `coord`; empty without a provider.
    pub fn context_menu_items(&self, coord: Coordinate) -> Vec<ContextMenuItem> {
        let Some(provider) = self.grid_store().state().context_menu.clone() else {
            return Vec::new();
        };
        let target = ContextMenuTarget {
            coordinate: coord,
            row_id: self.row_id_at(coord.y),
            field: self.field_at(coord.x),
        };
        provider.items(&target)
    }

    // ---- Delegated store operations ----

    pub fn set_rows(&self, rows: Vec<RowData>) {
        self.row_store().set_rows(rows);
    }

    pub fn append_rows_before(&self, index: usize, rows: Vec<RowData>) {
        self.row_store().append_rows_before(index, rows);
    }

    pub fn take_rows(&self, ids: Vec<String>) {
        self.row_store().take_rows(ids);
    }

    pub fn clear_rows(&self) {
        self.row_store().clear();
    }

    pub fn pin_rows_top(&self, ids: Vec<String>) {
        self.row_store().set_pinned_top_rows(ids);
    }

    pub fn pin_rows_bottom(&self, ids: Vec<String>) {
        self.row_store().set_pinned_bottom_rows(ids);
    }

    pub fn hover_row(&self, id: Option<String>) {
        self.row_store().set_hovered_row(id);
    }

    pub fn select_rows(&self, ids: Vec<String>) {
        self.row_store().select_rows(ids);
    }

    pub fn set_columns(&self, columns: Vec<ColumnNode>, defaults: ColumnDefaults) {
        self.column_store().set_columns(columns, defaults);
    }

    pub fn update_column_pinned(&self, field: &str, pinned: Option<ColumnPinned>) {
        self.column_store().update_column_pinned(field, pinned);
    }

    pub fn update_column_width(&self, field: &str, width: u32) {
        self.column_store().update_column_width(field, width);
    }

    pub fn update_group_collapsed(&self, group_id: &str, collapsed: bool) {
        self.column_store().update_group_collapsed(group_id, collapsed);
    }

    pub fn move_column(&self, field: &str, before: Option<&str>) {
        self.column_store().move_column(field, before);
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.grid_store().set_size(width, height);
    }

    pub fn set_fill_mode(&self, mode: Option<FillLimit>) {
        self.grid_store().set_fill_mode(mode);
    }

    pub fn set_loading(&self, loading: bool) {
        self.grid_store().set_loading(loading);
    }

    pub fn set_context_menu(&self, provider: Option<ContextMenuProvider>) {
        self.grid_store().set_context_menu(provider);
    }
}

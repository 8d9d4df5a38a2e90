//! JavaScript bindings for `Grid`.
//!
//! `XlGrid` is the object the render layer holds. Values cross the boundary
//! as plain JS values via serde-wasm-bindgen; coordinates as `[x, y]`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::error::XlgridError;
use crate::grid::Grid;
use crate::store::Subscription;
use crate::types::{
    ColumnDefaults, ColumnNode, ColumnPinned, Coordinate, FillLimit, GridOptions, RowData,
};

/// `navigator.clipboard`, when the page has one.
fn browser_clipboard() -> Option<web_sys::Clipboard> {
    let navigator = web_sys::window()?.navigator();
    let present = Reflect::get(navigator.as_ref(), &JsValue::from_str("clipboard"))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false);
    present.then(|| navigator.clipboard())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// `undefined` for `None`, otherwise the serialized value.
fn option_to_js<T: Serialize>(value: Option<T>) -> std::result::Result<JsValue, JsValue> {
    value.map_or(Ok(JsValue::UNDEFINED), |v| to_js(&v))
}

fn parse_pinned(pinned: Option<String>) -> Option<ColumnPinned> {
    match pinned.as_deref() {
        Some("left") => Some(ColumnPinned::Left),
        Some("right") => Some(ColumnPinned::Right),
        _ => None,
    }
}

fn parse_fill_mode(mode: Option<String>) -> Option<FillLimit> {
    match mode.as_deref() {
        Some("x") => Some(FillLimit::X),
        Some("y") => Some(FillLimit::Y),
        Some("xy") => Some(FillLimit::Xy),
        _ => None,
    }
}

/// The grid object exported to JavaScript.
#[wasm_bindgen]
pub struct XlGrid {
    grid: Rc<Grid>,
    change_subscription: RefCell<Option<Subscription>>,
}

#[wasm_bindgen]
impl XlGrid {
    /// Create a grid from a JS options object (see `GridOptions`).
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> std::result::Result<XlGrid, JsValue> {
        console_error_panic_hook::set_once();
        let options: GridOptions = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let grid = Grid::new(options);
        Ok(XlGrid {
            grid: Rc::new(grid),
            change_subscription: RefCell::new(None),
        })
    }

    /// `[x, y]` of a cell, `[-1, -1]` when unknown.
    #[wasm_bindgen]
    pub fn get_coordinate(&self, row_id: &str, field: &str) -> Vec<i32> {
        let c = self.grid.get_coordinate(row_id, field);
        vec![c.x, c.y]
    }

    #[wasm_bindgen]
    pub fn row_id_at(&self, y: i32) -> Option<String> {
        self.grid.row_id_at(y)
    }

    #[wasm_bindgen]
    pub fn field_at(&self, x: i32) -> Option<String> {
        self.grid.field_at(x)
    }

    #[wasm_bindgen]
    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    #[wasm_bindgen]
    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    #[wasm_bindgen]
    pub fn get_cell_value(&self, row_id: &str, field: &str) -> std::result::Result<JsValue, JsValue> {
        option_to_js(self.grid.get_cell_value(row_id, field))
    }

    #[wasm_bindgen]
    pub fn set_cell_value(
        &self,
        row_id: &str,
        field: &str,
        value: JsValue,
    ) -> std::result::Result<(), JsValue> {
        let value: Value = serde_wasm_bindgen::from_value(value)?;
        self.grid.set_cell_value(row_id, field, value);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn select_cells(&self, start_x: i32, start_y: i32, end_x: i32, end_y: i32) {
        self.grid
            .select_cells(Coordinate::new(start_x, start_y), Coordinate::new(end_x, end_y));
    }

    #[wasm_bindgen]
    pub fn clear_selection(&self) {
        self.grid.clear_selection();
    }

    /// `{left, top, right, bottom}` or `undefined` when not selected.
    #[wasm_bindgen]
    pub fn get_select_boundary(&self, x: i32, y: i32) -> std::result::Result<JsValue, JsValue> {
        option_to_js(self.grid.get_select_boundary(Coordinate::new(x, y)))
    }

    /// `{left, top, right, bottom}` or `undefined` when outside the fill strip.
    #[wasm_bindgen]
    pub fn get_filling_boundary(&self, x: i32, y: i32) -> std::result::Result<JsValue, JsValue> {
        option_to_js(self.grid.get_filling_boundary(Coordinate::new(x, y)))
    }

    #[wasm_bindgen]
    pub fn start_filling(&self, x: i32, y: i32) {
        self.grid.start_filling(Coordinate::new(x, y));
    }

    #[wasm_bindgen]
    pub fn apply_filling(&self) {
        self.grid.apply_filling();
    }

    #[wasm_bindgen]
    pub fn cancel_filling(&self) {
        self.grid.cancel_filling();
    }

    #[wasm_bindgen]
    pub fn start_editing(&self, row_id: &str, field: &str) {
        self.grid.start_editing(row_id, field);
    }

    #[wasm_bindgen]
    pub fn commit_editing(&self, value: JsValue) -> std::result::Result<(), JsValue> {
        let value: Value = serde_wasm_bindgen::from_value(value)?;
        self.grid.commit_editing(value);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn stop_editing(&self) {
        self.grid.stop_editing();
    }

    #[wasm_bindgen]
    pub fn append_rows_before(&self, index: usize, rows: JsValue) -> std::result::Result<(), JsValue> {
        let rows: Vec<RowData> = serde_wasm_bindgen::from_value(rows)?;
        self.grid.append_rows_before(index, rows);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn take_rows(&self, ids: Vec<String>) {
        self.grid.take_rows(ids);
    }

    #[wasm_bindgen]
    pub fn clear_rows(&self) {
        self.grid.clear_rows();
    }

    #[wasm_bindgen]
    pub fn pin_rows_top(&self, ids: Vec<String>) {
        self.grid.pin_rows_top(ids);
    }

    #[wasm_bindgen]
    pub fn pin_rows_bottom(&self, ids: Vec<String>) {
        self.grid.pin_rows_bottom(ids);
    }

    #[wasm_bindgen]
    pub fn hover_row(&self, id: Option<String>) {
        self.grid.hover_row(id);
    }

    #[wasm_bindgen]
    pub fn select_rows(&self, ids: Vec<String>) {
        self.grid.select_rows(ids);
    }

    #[wasm_bindgen]
    pub fn set_columns(&self, columns: JsValue, defaults: JsValue) -> std::result::Result<(), JsValue> {
        let columns: Vec<ColumnNode> = serde_wasm_bindgen::from_value(columns)?;
        let defaults: ColumnDefaults = if defaults.is_undefined() || defaults.is_null() {
            ColumnDefaults::default()
        } else {
            serde_wasm_bindgen::from_value(defaults)?
        };
        self.grid.set_columns(columns, defaults);
        Ok(())
    }

    /// `pinned` is `"left"`, `"right"` or absent to unpin.
    #[wasm_bindgen]
    pub fn update_column_pinned(&self, field: &str, pinned: Option<String>) {
        self.grid.update_column_pinned(field, parse_pinned(pinned));
    }

    #[wasm_bindgen]
    pub fn update_column_width(&self, field: &str, width: u32) {
        self.grid.update_column_width(field, width);
    }

    #[wasm_bindgen]
    pub fn update_group_collapsed(&self, group_id: &str, collapsed: bool) {
        self.grid.update_group_collapsed(group_id, collapsed);
    }

    #[wasm_bindgen]
    pub fn move_column(&self, field: &str, before: Option<String>) {
        self.grid.move_column(field, before.as_deref());
    }

    #[wasm_bindgen]
    pub fn set_size(&self, width: u32, height: u32) {
        self.grid.set_size(width, height);
    }

    /// `mode` is `"x"`, `"y"`, `"xy"` or absent to disable filling.
    #[wasm_bindgen]
    pub fn set_fill_mode(&self, mode: Option<String>) {
        self.grid.set_fill_mode(parse_fill_mode(mode));
    }

    #[wasm_bindgen]
    pub fn set_loading(&self, loading: bool) {
        self.grid.set_loading(loading);
    }

    /// Write the selection to `navigator.clipboard` as tab-separated text.
    ///
    /// The promise resolves to the copied text and rejects with the browser's
    /// error when the write is refused.
    #[wasm_bindgen]
    pub fn copy_selection(&self) -> Promise {
        let text = self.grid.selection_text();
        future_to_promise(async move {
            let clipboard = browser_clipboard()
                .ok_or_else(|| JsValue::from(XlgridError::ClipboardUnavailable))?;
            JsFuture::from(clipboard.write_text(&text))
                .await
                .inspect_err(|e| tracing::warn!(error = ?e, "clipboard write failed"))?;
            Ok(JsValue::from_str(&text))
        })
    }

    /// Read `navigator.clipboard` and paste at the selection.
    ///
    /// The promise rejects when the page has no clipboard access.
    #[wasm_bindgen]
    pub fn paste_from_clipboard(&self) -> Promise {
        let grid = Rc::clone(&self.grid);
        future_to_promise(async move {
            let clipboard = browser_clipboard()
                .ok_or_else(|| JsValue::from(XlgridError::ClipboardUnavailable))?;
            let text = JsFuture::from(clipboard.read_text()).await?;
            grid.paste_text(&text.as_string().unwrap_or_default());
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Paste already-read text at the selection.
    #[wasm_bindgen]
    pub fn paste_text(&self, text: &str) {
        self.grid.paste_text(text);
    }

    /// Full state snapshot as a plain JS object.
    #[wasm_bindgen]
    pub fn snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&*self.grid.state())
    }

    /// Call `callback()` after every state change; `None` stops notifications.
    #[wasm_bindgen]
    pub fn on_change(&self, callback: Option<Function>) {
        if let Some(previous) = self.change_subscription.borrow_mut().take() {
            previous.unsubscribe();
        }
        let Some(callback) = callback else {
            return;
        };
        let subscription = self.grid.root().store().subscribe_any(move |_, _, _| {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                tracing::warn!(error = ?e, "change callback threw");
            }
        });
        *self.change_subscription.borrow_mut() = Some(subscription);
    }
}

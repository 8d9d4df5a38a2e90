//! Browser smoke tests for the JS bindings.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use xlgrid::XlGrid;

wasm_bindgen_test_configure!(run_in_browser);

fn options() -> JsValue {
    js_sys::JSON::parse(
        r#"{
            "columns": [{"field": "a"}, {"field": "b"}],
            "rows": [
                {"id": "r1", "a": "x", "b": 1},
                {"id": "r2", "a": "y", "b": 2}
            ]
        }"#,
    )
    .unwrap()
}

#[wasm_bindgen_test]
fn test_construct_and_address_cells() {
    let grid = XlGrid::new(options()).unwrap();
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.column_count(), 2);
    assert_eq!(grid.get_coordinate("r2", "b"), vec![1, 1]);
    assert_eq!(grid.get_coordinate("r9", "b"), vec![-1, -1]);
    assert_eq!(grid.get_cell_value("r1", "a").unwrap().as_string().as_deref(), Some("x"));
}

#[wasm_bindgen_test]
fn test_default_options() {
    let grid = XlGrid::new(JsValue::UNDEFINED).unwrap();
    assert_eq!(grid.row_count(), 0);
}

#[wasm_bindgen_test]
fn test_boundary_and_snapshot() {
    let grid = XlGrid::new(options()).unwrap();
    grid.select_cells(0, 0, 1, 1);
    assert!(!grid.get_select_boundary(0, 0).unwrap().is_undefined());
    assert!(grid.get_select_boundary(5, 5).unwrap().is_undefined());
    assert!(grid.snapshot().unwrap().is_object());
}

#[wasm_bindgen_test]
fn test_on_change_callback() {
    let grid = XlGrid::new(options()).unwrap();
    let calls = js_sys::Array::new();
    let push = js_sys::Function::new_with_args("", "this.push(1)").bind(&calls);
    grid.on_change(Some(push));
    grid.set_cell_value("r1", "a", JsValue::from_str("z")).unwrap();
    grid.on_change(None);
    grid.set_cell_value("r1", "a", JsValue::from_str("w")).unwrap();
    assert_eq!(calls.length(), 1);
}

#[wasm_bindgen_test]
async fn test_copy_selection_settles_with_text_or_browser_error() {
    let grid = XlGrid::new(options()).unwrap();
    grid.select_cells(0, 0, 1, 0);
    match wasm_bindgen_futures::JsFuture::from(grid.copy_selection()).await {
        Ok(text) => assert_eq!(text.as_string().as_deref(), Some("x\t1")),
        Err(error) => assert!(!error.is_undefined()),
    }
}

#[wasm_bindgen_test]
fn test_throwing_change_callback_does_not_break_dispatch() {
    let grid = XlGrid::new(options()).unwrap();
    grid.on_change(Some(js_sys::Function::new_no_args("throw new Error('boom')")));
    grid.set_cell_value("r1", "a", JsValue::from_str("z")).unwrap();
    assert_eq!(grid.get_cell_value("r1", "a").unwrap().as_string().as_deref(), Some("z"));
}

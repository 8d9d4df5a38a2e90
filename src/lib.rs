//! xlgrid - spreadsheet-style data grid core for the web
//!
//! The state and interaction model behind a virtualized data grid, compiled
//! to WebAssembly for a canvas or DOM render layer:
//! - Rectangular selections and fill-handle ranges over visible coordinates
//! - Reducer stores for grid settings, rows, columns and cell interaction
//! - Row and column pinning, nested column groups with collapse
//! - Clipboard copy/paste as tab-separated text
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlGrid } from 'xlgrid';
//! await init();
//! const grid = new XlGrid({ columns, rows, fillMode: 'xy' });
//! grid.on_change(() => render(grid.snapshot()));
//! grid.select_cells(0, 0, 2, 3);
//! grid.copy_selection();
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use xlgrid::{Coordinate, Grid, GridOptions};
//!
//! let grid = Grid::new(GridOptions::default());
//! grid.select_cells(Coordinate::new(0, 0), Coordinate::new(1, 1));
//! assert_eq!(grid.get_coordinate("missing", "field"), Coordinate::NONE);
//! ```

pub mod error;
pub mod grid;
pub mod range;
pub mod store;
pub mod types;

#[cfg(target_arch = "wasm32")]
mod bindings;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use bindings::XlGrid;
pub use error::{Result, XlgridError};
pub use grid::{parse_clipboard_text, Clipboard, Grid, MemoryClipboard};
pub use range::{CellRange, FillRange, Range};
pub use store::{Store, Subscription};

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

//! Clipboard copy/paste for `Grid`.
//!
//! Text format: cells joined by `\t`, rows by `\n`. On paste, `\r\n` and
//! lone `\r` are normalized to `\n` and a single trailing line break is
//! dropped.

use std::cell::RefCell;
use std::ops::ControlFlow;

use serde_json::Value;

use super::Grid;
use crate::error::{Result, XlgridError};
use crate::range::Range;
use crate::types::Coordinate;

/// Text clipboard capability supplied by the host.
pub trait Clipboard {
    /// # Errors
    /// Returns an error if the backend rejects the write.
    fn write_text(&self, text: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn read_text(&self) -> Result<String>;
}

/// In-process clipboard, for native hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: RefCell<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(text.into()),
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        *self.text.borrow_mut() = text.to_string();
        Ok(())
    }

    fn read_text(&self) -> Result<String> {
        Ok(self.text())
    }
}

/// Split clipboard text into rows of cells.
///
/// A cell starting with `"` is quoted: tabs and line breaks inside it are
/// kept and `""` stands for one quote. One trailing line break is dropped.
pub fn parse_clipboard_text(text: &str) -> Vec<Vec<String>> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);
    if body.is_empty() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut cell_start = true;
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if quoted {
            if c != '"' {
                cell.push(c);
            } else if chars.next_if_eq(&'"').is_some() {
                cell.push('"');
            } else {
                quoted = false;
            }
            continue;
        }
        match c {
            '"' if cell_start => quoted = true,
            '\t' => {
                row.push(std::mem::take(&mut cell));
                cell_start = true;
                continue;
            }
            '\r' | '\n' => {
                if c == '\r' {
                    chars.next_if_eq(&'\n');
                }
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
                cell_start = true;
                continue;
            }
            _ => cell.push(c),
        }
        cell_start = false;
    }
    row.push(cell);
    rows.push(row);
    rows
}

/// Quote a cell holding a tab, line break or quote so it survives a paste.
fn escape_cell_text(text: &str) -> String {
    if text.contains(['\t', '\n', '\r', '"']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn value_to_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

impl Grid {
    /// Current selection(s) as clipboard text, display values, row-major.
    pub fn selection_text(&self) -> String {
        let state = self.cell_store().state();
        let mut out = String::new();
        for (i, range) in state.selections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let mut last_row: Option<i32> = None;
            range.each(|coord, _| {
                match last_row {
                    Some(y) if y != coord.y => out.push('\n'),
                    Some(_) => out.push('\t'),
                    None => {}
                }
                last_row = Some(coord.y);
                let text = value_to_text(self.get_cell_value_by_coord(coord));
                out.push_str(&escape_cell_text(&text));
                ControlFlow::Continue(())
            });
        }
        out
    }

    /// Copy the selection to the clipboard and return the copied text.
    ///
    /// # Errors
    /// Returns [`XlgridError::ClipboardUnavailable`] without a clipboard, or
    /// the backend's error if the write fails.
    pub fn copy_selection(&self) -> Result<String> {
        let clipboard = self
            .clipboard
            .as_ref()
            .ok_or(XlgridError::ClipboardUnavailable)?;
        let text = self.selection_text();
        clipboard.write_text(&text).inspect_err(|e| {
            tracing::warn!(error = %e, "clipboard write failed");
        })?;
        Ok(text)
    }

    /// Write pasted text into the grid starting at the selection's top-left
    /// cell. Cells falling outside the grid are ignored.
    pub fn paste_text(&self, text: &str) {
        let Some(start) = self
            .cell_store()
            .state()
            .primary_selection()
            .and_then(|range| range.start_coord())
        else {
            tracing::debug!("paste without a selection ignored");
            return;
        };
        for (dy, line) in parse_clipboard_text(text).into_iter().enumerate() {
            for (dx, cell) in line.into_iter().enumerate() {
                let (Ok(dx), Ok(dy)) = (i32::try_from(dx), i32::try_from(dy)) else {
                    continue;
                };
                let target = start.offset(Coordinate::new(dx, dy));
                self.set_cell_value_by_coord(target, Value::String(cell));
            }
        }
    }

    /// Read the clipboard and paste it at the selection.
    ///
    /// # Errors
    /// Returns [`XlgridError::ClipboardUnavailable`] without a clipboard, or
    /// the backend's error if the read fails.
    pub fn paste_from_clipboard(&self) -> Result<()> {
        let clipboard = self
            .clipboard
            .as_ref()
            .ok_or(XlgridError::ClipboardUnavailable)?;
        let text = clipboard.read_text().inspect_err(|e| {
            tracing::warn!(error = %e, "clipboard read failed");
        })?;
        self.paste_text(&text);
        Ok(())
    }
}

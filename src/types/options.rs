use serde::{Deserialize, Serialize};

use super::{ColumnDefaults, ColumnNode, ContextMenuProvider, FillLimit, RowData};

/// Everything needed to construct a grid.
///
/// Every field has a default so hosts only pass what they care about.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    /// Viewport width in logical pixels
    pub width: u32,
    /// Viewport height in logical pixels
    pub height: u32,
    /// Height of a body row in logical pixels
    pub row_height: u32,
    /// Rows rendered beyond the viewport on each side
    pub preload_count: u32,
    /// Axis restriction for the fill handle; `None` disables filling
    pub fill_mode: Option<FillLimit>,
    pub loading: bool,
    pub columns: Vec<ColumnNode>,
    pub default_column_options: ColumnDefaults,
    pub rows: Vec<RowData>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            row_height: 32,
            preload_count: 10,
            fill_mode: Some(FillLimit::Xy),
            loading: false,
            columns: Vec::new(),
            default_column_options: ColumnDefaults::default(),
            rows: Vec::new(),
        }
    }
}

impl GridOptions {
    /// Parse options from a JSON document.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a field has the wrong shape.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let options: GridOptions = serde_json::from_str(json)?;
        if options.row_height == 0 {
            return Err(crate::error::XlgridError::InvalidOptions(
                "rowHeight must be greater than zero".into(),
            ));
        }
        Ok(options)
    }
}

/// Grid-level display configuration held by the grid store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub row_height: u32,
    pub preload_count: u32,
    pub fill_mode: Option<FillLimit>,
    pub loading: bool,
    #[serde(skip)]
    pub context_menu: Option<ContextMenuProvider>,
}

impl GridConfig {
    pub fn from_options(options: &GridOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            row_height: options.row_height,
            preload_count: options.preload_count,
            fill_mode: options.fill_mode,
            loading: options.loading,
            context_menu: None,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::from_options(&GridOptions::default())
    }
}

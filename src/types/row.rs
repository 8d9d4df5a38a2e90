use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Edge a row is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPinned {
    Top,
    Bottom,
}

/// One row of grid data.
///
/// Deserializes from a flat JS object: `id` and `pinned` are reserved keys,
/// every other key is a cell value keyed by column field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<RowPinned>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl RowData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pinned: None,
            data: Map::new(),
        }
    }

    /// Builder-style cell value.
    #[must_use]
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(field.into(), value.into());
        self
    }

    /// Builder-style pin.
    #[must_use]
    pub fn pinned(mut self, pinned: RowPinned) -> Self {
        self.pinned = Some(pinned);
        self
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

use serde::{Deserialize, Serialize};

/// A visible cell position: `x` is the column index, `y` the row index.
///
/// Both axes count the visible, ordered sequence (pinned-leading, then normal,
/// then pinned-trailing). Coordinates are derived from row/column ids and
/// never stored as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Returned when a row or column cannot be resolved.
    pub const NONE: Coordinate = Coordinate { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this coordinate addresses a real cell (both axes non-negative).
    pub fn is_valid(self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// Component on the given axis.
    pub fn on(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Copy with the component on `axis` replaced.
    #[must_use]
    pub fn with(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Self { x: value, y: self.y },
            Axis::Y => Self { x: self.x, y: value },
        }
    }

    /// Offset by a relative coordinate.
    #[must_use]
    pub fn offset(self, relative: Coordinate) -> Self {
        Self {
            x: self.x.saturating_add(relative.x),
            y: self.y.saturating_add(relative.y),
        }
    }
}

/// Which edges of its containing range a cell sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Boundary {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

/// One grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Axis restriction for fill-handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillLimit {
    /// Only extend horizontally
    X,
    /// Only extend vertically
    Y,
    /// Extend along whichever axis the drag moved further on
    #[serde(alias = "XY")]
    Xy,
}

/// The cell currently being edited, addressed by identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPosition {
    pub row_id: String,
    pub field: String,
}

impl CellPosition {
    pub fn new(row_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            field: field.into(),
        }
    }
}

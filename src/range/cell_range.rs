use serde::Serialize;

use super::{Bounds, Range};
use crate::types::Coordinate;

/// A selection rectangle spanned by two corners, inclusive on both ends.
///
/// The corners are kept as given (the anchor may be bottom-right); the
/// normalized extent is derived once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellRange {
    start: Option<Coordinate>,
    end: Option<Coordinate>,
    #[serde(flatten)]
    bounds: Option<Bounds>,
}

impl CellRange {
    pub fn new(start: Option<Coordinate>, end: Option<Coordinate>) -> Self {
        let bounds = match (start, end) {
            (Some(a), Some(b)) => Some(Bounds::from_corners(a, b)),
            _ => None,
        };
        Self { start, end, bounds }
    }

    /// Range between two known corners.
    pub fn from_coords(start: Coordinate, end: Coordinate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Single-cell range.
    pub fn single(coord: Coordinate) -> Self {
        Self::from_coords(coord, coord)
    }

    pub(crate) fn from_bounds(bounds: Bounds) -> Self {
        Self::from_coords(
            Coordinate::new(bounds.min_x, bounds.min_y),
            Coordinate::new(bounds.max_x, bounds.max_y),
        )
    }

    /// The anchor corner as given.
    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    /// The moving corner as given.
    pub fn end(&self) -> Option<Coordinate> {
        self.end
    }

    /// Smallest range covering both `self` and `other`; empty ranges are ignored.
    #[must_use]
    pub fn union(&self, other: &impl Range) -> CellRange {
        match (self.bounds, other.bounds()) {
            (Some(a), Some(b)) => CellRange::from_bounds(Bounds {
                min_x: a.min_x.min(b.min_x),
                min_y: a.min_y.min(b.min_y),
                max_x: a.max_x.max(b.max_x),
                max_y: a.max_y.max(b.max_y),
            }),
            (Some(_), None) => *self,
            (None, Some(b)) => CellRange::from_bounds(b),
            (None, None) => CellRange::new(None, None),
        }
    }
}

impl Range for CellRange {
    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

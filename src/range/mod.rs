//! Rectangular coordinate ranges.
//!
//! - [`Range`]: boundary tests and iteration shared by every range kind
//! - [`CellRange`]: a selection rectangle spanned by two corners
//! - [`FillRange`]: the strip a fill-handle drag extends a selection into
//!
//! Malformed input never fails: a range missing a corner is empty and every
//! query on it answers "not contained".

mod cell_range;
mod fill_range;

use std::ops::ControlFlow;

use serde::Serialize;

use crate::types::{Axis, Boundary, Coordinate};

pub use cell_range::CellRange;
pub use fill_range::FillRange;

/// Normalized inclusive extent of a non-empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn from_corners(a: Coordinate, b: Coordinate) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn min(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.min_x,
            Axis::Y => self.min_y,
        }
    }

    pub fn max(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }

    /// Number of cells spanned on `axis`.
    pub fn span(&self, axis: Axis) -> i32 {
        self.max(axis) - self.min(axis) + 1
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x >= self.min_x
            && coord.x <= self.max_x
            && coord.y >= self.min_y
            && coord.y <= self.max_y
    }
}

/// Lazy row-major walk over a range's cells.
///
/// Yields `(absolute, relative)` where `relative` is measured from the
/// range's top-left corner.
#[derive(Debug, Clone)]
pub struct Cells {
    bounds: Option<Bounds>,
    next: Option<Coordinate>,
}

impl Cells {
    fn new(bounds: Option<Bounds>) -> Self {
        let next = bounds.map(|b| Coordinate::new(b.min_x, b.min_y));
        Self { bounds, next }
    }
}

impl Iterator for Cells {
    type Item = (Coordinate, Coordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let bounds = self.bounds?;
        let current = self.next?;
        self.next = if current.x < bounds.max_x {
            Some(Coordinate::new(current.x + 1, current.y))
        } else if current.y < bounds.max_y {
            Some(Coordinate::new(bounds.min_x, current.y + 1))
        } else {
            None
        };
        let relative = Coordinate::new(current.x - bounds.min_x, current.y - bounds.min_y);
        Some((current, relative))
    }
}

/// Behaviour shared by every rectangular range.
pub trait Range {
    /// Normalized extent, or `None` when the range is empty.
    fn bounds(&self) -> Option<Bounds>;

    fn is_empty(&self) -> bool {
        self.bounds().is_none()
    }

    /// Every cell in row-major order. Restartable: each call walks from the origin.
    fn cells(&self) -> Cells {
        Cells::new(self.bounds())
    }

    /// Visit every cell in row-major order with its origin-relative offset.
    /// Returning `ControlFlow::Break` stops the walk.
    fn each<F>(&self, mut f: F)
    where
        F: FnMut(Coordinate, Coordinate) -> ControlFlow<()>,
    {
        for (coord, relative) in self.cells() {
            if f(coord, relative).is_break() {
                return;
            }
        }
    }

    /// Visit every row index with its offset from the top row.
    /// Returning `ControlFlow::Break` stops the walk.
    fn each_row<F>(&self, mut f: F)
    where
        F: FnMut(i32, i32) -> ControlFlow<()>,
    {
        let Some(bounds) = self.bounds() else {
            return;
        };
        for y in bounds.min_y..=bounds.max_y {
            if f(y, y - bounds.min_y).is_break() {
                return;
            }
        }
    }

    fn contains(&self, coord: Coordinate) -> bool {
        self.bounds().is_some_and(|b| b.contains(coord))
    }

    fn is_left(&self, coord: Coordinate) -> bool {
        self.bounds()
            .is_some_and(|b| b.contains(coord) && coord.x == b.min_x)
    }

    fn is_right(&self, coord: Coordinate) -> bool {
        self.bounds()
            .is_some_and(|b| b.contains(coord) && coord.x == b.max_x)
    }

    fn is_top(&self, coord: Coordinate) -> bool {
        self.bounds()
            .is_some_and(|b| b.contains(coord) && coord.y == b.min_y)
    }

    fn is_bottom(&self, coord: Coordinate) -> bool {
        self.bounds()
            .is_some_and(|b| b.contains(coord) && coord.y == b.max_y)
    }

    /// Edge flags for `coord`, or `None` when it lies outside the range.
    fn boundary(&self, coord: Coordinate) -> Option<Boundary> {
        let b = self.bounds()?;
        if !b.contains(coord) {
            return None;
        }
        Some(Boundary {
            left: coord.x == b.min_x,
            top: coord.y == b.min_y,
            right: coord.x == b.max_x,
            bottom: coord.y == b.max_y,
        })
    }

    /// Top-left corner.
    fn start_coord(&self) -> Option<Coordinate> {
        self.bounds().map(|b| Coordinate::new(b.min_x, b.min_y))
    }

    /// Bottom-right corner.
    fn end_coord(&self) -> Option<Coordinate> {
        self.bounds().map(|b| Coordinate::new(b.max_x, b.max_y))
    }

    /// Translate an origin-relative offset back to an absolute coordinate.
    fn global_coord(&self, relative: Coordinate) -> Option<Coordinate> {
        self.start_coord().map(|origin| origin.offset(relative))
    }

    fn width(&self) -> i32 {
        self.bounds().map_or(0, |b| b.span(Axis::X))
    }

    fn height(&self) -> i32 {
        self.bounds().map_or(0, |b| b.span(Axis::Y))
    }
}

use std::ops::ControlFlow;

use serde::Serialize;

use super::{Bounds, CellRange, Range};
use crate::types::{Axis, Coordinate, FillLimit};

/// The strip a fill-handle drag extends a reference selection into.
///
/// The strip grows along exactly one axis, outward from whichever edge of the
/// reference the drag target lies beyond, and has the reference's extent on
/// the other axis. The reference itself is never part of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillRange {
    reference: CellRange,
    axis: Option<Axis>,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
    #[serde(flatten)]
    bounds: Option<Bounds>,
}

impl FillRange {
    /// Build the fill strip for a drag from `reference` to `current`.
    ///
    /// Empty when any input is missing, when `current` lies inside the
    /// reference, or when `current` does not leave the reference's span on
    /// the resolved axis.
    ///
    /// With [`FillLimit::Xy`] the axis is the one with the larger distance
    /// from the reference's end cell, `y` on a tie. A diagonal step off the
    /// end cell therefore resolves to `y`, and if the pointer's row is still
    /// inside the reference no strip is produced: dragging from `{2,2}` of a
    /// `{1,1}`-`{2,2}` reference to `{3,1}` fills nothing.
    pub fn new(
        reference: Option<&CellRange>,
        current: Option<Coordinate>,
        limit: Option<FillLimit>,
    ) -> Self {
        let empty = Self {
            reference: reference.copied().unwrap_or(CellRange::new(None, None)),
            axis: None,
            start: None,
            end: None,
            bounds: None,
        };
        let (Some(reference), Some(current), Some(limit)) = (reference, current, limit) else {
            return empty;
        };
        let (Some(ref_bounds), Some(ref_end)) = (reference.bounds(), reference.end()) else {
            return empty;
        };
        if ref_bounds.contains(current) {
            return empty;
        }

        let axis = match limit {
            FillLimit::X => Axis::X,
            FillLimit::Y => Axis::Y,
            FillLimit::Xy => {
                let dx = (i64::from(current.x) - i64::from(ref_end.x)).abs();
                let dy = (i64::from(current.y) - i64::from(ref_end.y)).abs();
                if dx > dy {
                    Axis::X
                } else {
                    Axis::Y
                }
            }
        };

        let target = current.on(axis);
        let near = if target < ref_bounds.min(axis) {
            ref_bounds.min(axis) - 1
        } else if target > ref_bounds.max(axis) {
            ref_bounds.max(axis) + 1
        } else {
            return empty;
        };

        let cross = axis.cross();
        let start = Coordinate::default()
            .with(axis, near)
            .with(cross, ref_bounds.min(cross));
        let end = Coordinate::default()
            .with(axis, target)
            .with(cross, ref_bounds.max(cross));

        Self {
            reference: *reference,
            axis: Some(axis),
            start: Some(start),
            end: Some(end),
            bounds: Some(Bounds::from_corners(start, end)),
        }
    }

    /// The selection this fill extends.
    pub fn reference(&self) -> &CellRange {
        &self.reference
    }

    /// Axis the strip grows along, `None` when empty.
    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    /// Edge of the strip adjacent to the reference.
    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    /// Drag target edge of the strip.
    pub fn end(&self) -> Option<Coordinate> {
        self.end
    }

    /// True when the strip lies before the reference (dragged up or left).
    pub fn is_reverse(&self) -> bool {
        match (self.axis, self.bounds, self.reference.bounds()) {
            (Some(axis), Some(b), Some(r)) => b.min(axis) < r.min(axis),
            _ => false,
        }
    }

    /// Split the strip into reference-sized pieces, walking outward from the
    /// reference. The piece farthest from the reference may be shorter.
    pub fn chunks(&self) -> Chunks {
        let (Some(axis), Some(bounds), Some(reference)) =
            (self.axis, self.bounds, self.reference.bounds())
        else {
            return Chunks::exhausted();
        };
        let reverse = self.is_reverse();
        let (cursor, edge) = if reverse {
            (bounds.max(axis), bounds.min(axis))
        } else {
            (bounds.min(axis), bounds.max(axis))
        };
        Chunks {
            axis,
            cross_min: bounds.min(axis.cross()),
            cross_max: bounds.max(axis.cross()),
            size: reference.span(axis),
            cursor,
            edge,
            reverse,
            done: false,
        }
    }

    /// Callback form of [`chunks`](Self::chunks). `ControlFlow::Break` stops.
    pub fn chunk<F>(&self, mut f: F)
    where
        F: FnMut(CellRange) -> ControlFlow<()>,
    {
        for chunk in self.chunks() {
            if f(chunk).is_break() {
                return;
            }
        }
    }

    /// Visit every cell of the strip paired with the reference cell whose
    /// value it repeats. Returning `ControlFlow::Break` stops the walk.
    pub fn each_with_source<F>(&self, mut f: F)
    where
        F: FnMut(Coordinate, Coordinate) -> ControlFlow<()>,
    {
        let (Some(axis), Some(reference)) = (self.axis, self.reference.bounds()) else {
            return;
        };
        let size = reference.span(axis);
        let reverse = self.is_reverse();
        let mut flow = ControlFlow::Continue(());
        self.chunk(|chunk| {
            let short = size - chunk.bounds().map_or(size, |b| b.span(axis));
            chunk.each(|target, relative| {
                // A short chunk before the reference repeats the reference's tail.
                let relative = if reverse {
                    relative.with(axis, relative.on(axis) + short)
                } else {
                    relative
                };
                match self.reference.global_coord(relative) {
                    Some(source) => {
                        flow = f(target, source);
                        flow
                    }
                    None => ControlFlow::Continue(()),
                }
            });
            flow
        });
    }
}

impl Range for FillRange {
    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

/// Iterator over the reference-sized pieces of a [`FillRange`].
#[derive(Debug, Clone)]
pub struct Chunks {
    axis: Axis,
    cross_min: i32,
    cross_max: i32,
    size: i32,
    cursor: i32,
    edge: i32,
    reverse: bool,
    done: bool,
}

impl Chunks {
    fn exhausted() -> Self {
        Self {
            axis: Axis::X,
            cross_min: 0,
            cross_max: 0,
            size: 1,
            cursor: 0,
            edge: 0,
            reverse: false,
            done: true,
        }
    }
}

impl Iterator for Chunks {
    type Item = CellRange;

    fn next(&mut self) -> Option<CellRange> {
        if self.done {
            return None;
        }
        let (lo, hi) = if self.reverse {
            let lo = (self.cursor - self.size + 1).max(self.edge);
            (lo, self.cursor)
        } else {
            let hi = (self.cursor + self.size - 1).min(self.edge);
            (self.cursor, hi)
        };
        if self.reverse {
            self.done = lo == self.edge;
            self.cursor = lo - 1;
        } else {
            self.done = hi == self.edge;
            self.cursor = hi + 1;
        }
        let cross = self.axis.cross();
        let start = Coordinate::default()
            .with(self.axis, lo)
            .with(cross, self.cross_min);
        let end = Coordinate::default()
            .with(self.axis, hi)
            .with(cross, self.cross_max);
        Some(CellRange::from_coords(start, end))
    }
}

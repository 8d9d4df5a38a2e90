//! Tests for rectangular ranges and fill-handle strips.
//!
//! ## Coverage
//! - `CellRange`: normalization, boundary flags, iteration order, union
//! - `FillRange`: axis resolution, clamping, emptiness, chunking, source mapping
//! - Property tests for the containment and edge predicates
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::ops::ControlFlow;

use proptest::prelude::*;
use test_case::test_case;
use xlgrid::types::{Axis, Boundary, Coordinate, FillLimit};
use xlgrid::{CellRange, FillRange, Range};

fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

fn range(x1: i32, y1: i32, x2: i32, y2: i32) -> CellRange {
    CellRange::from_coords(c(x1, y1), c(x2, y2))
}

fn fill(reference: &CellRange, current: Coordinate, limit: FillLimit) -> FillRange {
    FillRange::new(Some(reference), Some(current), Some(limit))
}

/// Chunk extents along `axis` as `(lo, hi)` pairs, in yield order.
fn chunk_spans(fill: &FillRange, axis: Axis) -> Vec<(i32, i32)> {
    fill.chunks()
        .map(|chunk| {
            let b = chunk.bounds().unwrap();
            (b.min(axis), b.max(axis))
        })
        .collect()
}

// ============================================================================
// CellRange
// ============================================================================

mod cell_range_tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_corners_are_normalized() {
        let r = range(4, 3, 1, 1);
        let b = r.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (1, 1, 4, 3));
        assert_eq!(r.start(), Some(c(4, 3)));
        assert_eq!(r.end(), Some(c(1, 1)));
        assert_eq!(r.start_coord(), Some(c(1, 1)));
        assert_eq!(r.end_coord(), Some(c(4, 3)));
        assert_eq!((r.width(), r.height()), (4, 3));
    }

    #[test]
    fn test_missing_corner_is_inert() {
        let r = CellRange::new(Some(c(0, 0)), None);
        assert!(r.is_empty());
        assert!(!r.contains(c(0, 0)));
        assert!(!r.is_left(c(0, 0)));
        assert!(r.boundary(c(0, 0)).is_none());
        assert_eq!(r.cells().count(), 0);
        assert_eq!((r.width(), r.height()), (0, 0));
        assert!(r.global_coord(c(0, 0)).is_none());
    }

    // 7×5 grid, selection (1,1)-(4,3).
    #[test_case(2, 2, Some((false, false, false, false)); "interior")]
    #[test_case(1, 1, Some((true, true, false, false)); "top left corner")]
    #[test_case(3, 1, Some((false, true, false, false)); "top edge")]
    #[test_case(4, 1, Some((false, true, true, false)); "top right corner")]
    #[test_case(4, 2, Some((false, false, true, false)); "right edge")]
    #[test_case(4, 3, Some((false, false, true, true)); "bottom right corner")]
    #[test_case(1, 0, None; "outside above")]
    #[test_case(5, 2, None; "outside right")]
    fn test_boundary(x: i32, y: i32, expected: Option<(bool, bool, bool, bool)>) {
        let r = range(1, 1, 4, 3);
        let expected = expected.map(|(left, top, right, bottom)| Boundary {
            left,
            top,
            right,
            bottom,
        });
        assert_eq!(r.boundary(c(x, y)), expected);
    }

    #[test]
    fn test_each_is_row_major_with_relative_offsets() {
        let r = range(2, 5, 3, 6);
        let mut seen = Vec::new();
        r.each(|abs, rel| {
            seen.push((abs, rel));
            ControlFlow::Continue(())
        });
        assert_eq!(
            seen,
            vec![
                (c(2, 5), c(0, 0)),
                (c(3, 5), c(1, 0)),
                (c(2, 6), c(0, 1)),
                (c(3, 6), c(1, 1)),
            ]
        );
    }

    #[test]
    fn test_each_stops_on_break() {
        let r = range(0, 0, 9, 9);
        let mut visited = 0;
        r.each(|_, _| {
            visited += 1;
            if visited == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_each_row() {
        let r = range(0, 3, 5, 5);
        let mut rows = Vec::new();
        r.each_row(|y, rel| {
            rows.push((y, rel));
            ControlFlow::Continue(())
        });
        assert_eq!(rows, vec![(3, 0), (4, 1), (5, 2)]);
    }

    #[test]
    fn test_cells_is_restartable() {
        let r = range(0, 0, 1, 1);
        let first: Vec<_> = r.cells().collect();
        let second: Vec<_> = r.cells().collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_global_coord() {
        let r = range(3, 4, 5, 6);
        assert_eq!(r.global_coord(c(1, 2)), Some(c(4, 6)));
    }

    #[test]
    fn test_union() {
        let a = range(0, 0, 1, 1);
        let b = range(3, 2, 4, 5);
        let u = a.union(&b);
        assert_eq!(u.start_coord(), Some(c(0, 0)));
        assert_eq!(u.end_coord(), Some(c(4, 5)));
        assert_eq!(a.union(&CellRange::new(None, None)), a);
    }
}

// ============================================================================
// FillRange
// ============================================================================

mod fill_range_tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_x_limit_clamps_rows_to_reference() {
        let fill = fill(&range(1, 1, 2, 2), c(4, 4), FillLimit::X);
        for inside in [c(3, 1), c(3, 2), c(4, 1), c(4, 2)] {
            assert!(fill.contains(inside), "{inside:?} should be filled");
        }
        for outside in [c(3, 3), c(3, 4), c(4, 3), c(4, 4)] {
            assert!(!fill.contains(outside), "{outside:?} should not be filled");
        }
        assert_eq!(fill.axis(), Some(Axis::X));
        assert_eq!(fill.start(), Some(c(3, 1)));
        assert_eq!(fill.end(), Some(c(4, 2)));
        assert!(!fill.is_reverse());
    }

    #[test]
    fn test_y_limit_clamps_columns_to_reference() {
        let fill = fill(&range(1, 1, 2, 2), c(4, 4), FillLimit::Y);
        let b = fill.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (1, 3, 2, 4));
    }

    #[test_case(5, 3, Axis::X; "wider drag extends columns")]
    #[test_case(3, 6, Axis::Y; "taller drag extends rows")]
    #[test_case(4, 4, Axis::Y; "tie extends rows")]
    #[test_case(-2, 1, Axis::X; "leftward drag")]
    fn test_xy_resolves_larger_displacement(x: i32, y: i32, axis: Axis) {
        let fill = fill(&range(1, 1, 2, 2), c(x, y), FillLimit::Xy);
        assert_eq!(fill.axis(), Some(axis));
    }

    #[test]
    fn test_xy_diagonal_step_within_reference_rows_is_empty() {
        let fill = fill(&range(1, 1, 2, 2), c(3, 1), FillLimit::Xy);
        assert!(fill.is_empty());
        assert!(fill.axis().is_none());
    }

    #[test]
    fn test_reverse_fill_grows_up_from_top_edge() {
        let fill = fill(&range(0, 10, 1, 12), c(0, 5), FillLimit::Y);
        assert!(fill.is_reverse());
        assert_eq!(fill.start(), Some(c(0, 9)));
        assert_eq!(fill.end(), Some(c(1, 5)));
        let b = fill.bounds().unwrap();
        assert_eq!((b.min_y, b.max_y), (5, 9));
    }

    #[test]
    fn test_empty_inputs() {
        let r = range(1, 1, 2, 2);
        assert!(FillRange::new(None, Some(c(4, 4)), Some(FillLimit::Xy)).is_empty());
        assert!(FillRange::new(Some(&r), None, Some(FillLimit::Xy)).is_empty());
        assert!(FillRange::new(Some(&r), Some(c(4, 4)), None).is_empty());
        let no_reference = CellRange::new(None, None);
        assert!(FillRange::new(Some(&no_reference), Some(c(4, 4)), Some(FillLimit::Y)).is_empty());
    }

    #[test]
    fn test_target_inside_reference_is_empty() {
        let fill = fill(&range(1, 1, 3, 3), c(2, 2), FillLimit::Xy);
        assert!(fill.is_empty());
        assert!(fill.axis().is_none());
        assert!(fill.boundary(c(2, 2)).is_none());
        assert_eq!(fill.chunks().count(), 0);
    }

    #[test]
    fn test_target_within_span_on_locked_axis_is_empty() {
        // Dragged straight down while only columns may grow.
        let fill = fill(&range(1, 1, 2, 2), c(1, 6), FillLimit::X);
        assert!(fill.is_empty());
    }

    #[test]
    fn test_reference_is_never_filled() {
        let r = range(1, 1, 2, 2);
        let fill = fill(&r, c(2, 7), FillLimit::Y);
        assert!(r.cells().all(|(cell, _)| !fill.contains(cell)));
    }
}

// ============================================================================
// Chunking
// ============================================================================

mod chunk_tests {
    use super::*;

    #[test]
    fn test_two_row_pattern_down_seven_rows() {
        let fill = fill(&range(0, 0, 2, 1), c(0, 8), FillLimit::Y);
        assert_eq!(
            chunk_spans(&fill, Axis::Y),
            vec![(2, 3), (4, 5), (6, 7), (8, 8)]
        );
        for chunk in fill.chunks() {
            let b = chunk.bounds().unwrap();
            assert_eq!((b.min_x, b.max_x), (0, 2), "chunks span the full width");
        }
    }

    #[test]
    fn test_exact_multiple_has_no_partial_chunk() {
        let partial = fill(&range(0, 0, 0, 2), c(0, 9), FillLimit::Y);
        assert_eq!(chunk_spans(&partial, Axis::Y), vec![(3, 5), (6, 8), (9, 9)]);
        let exact = fill(&range(0, 0, 0, 2), c(0, 8), FillLimit::Y);
        assert_eq!(chunk_spans(&exact, Axis::Y), vec![(3, 5), (6, 8)]);
    }

    #[test]
    fn test_reverse_chunks_walk_away_from_reference() {
        let fill = fill(&range(0, 10, 1, 12), c(0, 5), FillLimit::Y);
        assert_eq!(chunk_spans(&fill, Axis::Y), vec![(7, 9), (5, 6)]);
    }

    #[test]
    fn test_horizontal_chunks() {
        let fill = fill(&range(1, 0, 2, 3), c(6, 1), FillLimit::X);
        assert_eq!(chunk_spans(&fill, Axis::X), vec![(3, 4), (5, 6)]);
    }

    #[test]
    fn test_chunk_callback_can_stop_early() {
        let fill = fill(&range(0, 0, 0, 0), c(0, 10), FillLimit::Y);
        let mut seen = 0;
        fill.chunk(|_| {
            seen += 1;
            if seen == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_chunks_cover_fill_exactly() {
        let fill = fill(&range(0, 0, 1, 2), c(1, 13), FillLimit::Y);
        let chunked: usize = fill.chunks().map(|chunk| chunk.cells().count()).sum();
        assert_eq!(chunked, fill.cells().count());
    }

    #[test]
    fn test_sources_repeat_reference_forward() {
        let fill = fill(&range(0, 0, 0, 1), c(0, 4), FillLimit::Y);
        let mut pairs = Vec::new();
        fill.each_with_source(|target, source| {
            pairs.push((target.y, source.y));
            ControlFlow::Continue(())
        });
        assert_eq!(pairs, vec![(2, 0), (3, 1), (4, 0)]);
    }

    #[test]
    fn test_sources_repeat_reference_backward() {
        let fill = fill(&range(0, 10, 0, 12), c(0, 5), FillLimit::Y);
        let mut pairs = Vec::new();
        fill.each_with_source(|target, source| {
            pairs.push((target.y, source.y));
            ControlFlow::Continue(())
        });
        pairs.sort_unstable();
        // Period three, aligned to the reference.
        assert_eq!(
            pairs,
            vec![(5, 11), (6, 12), (7, 10), (8, 11), (9, 12)]
        );
    }
}

// ============================================================================
// Properties
// ============================================================================

fn coord_strategy() -> impl Strategy<Value = Coordinate> {
    (-20i32..20, -20i32..20).prop_map(|(x, y)| Coordinate::new(x, y))
}

proptest! {
    #[test]
    fn prop_contains_matches_bounds(a in coord_strategy(), b in coord_strategy(), p in coord_strategy()) {
        let r = CellRange::from_coords(a, b);
        let inside = p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x)
            && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y);
        prop_assert_eq!(r.contains(p), inside);
        prop_assert_eq!(r.boundary(p).is_some(), inside);
    }

    #[test]
    fn prop_edges_imply_containment(a in coord_strategy(), b in coord_strategy(), p in coord_strategy()) {
        let r = CellRange::from_coords(a, b);
        prop_assert_eq!(r.is_left(p), r.contains(p) && p.x == a.x.min(b.x));
        prop_assert_eq!(r.is_right(p), r.contains(p) && p.x == a.x.max(b.x));
        prop_assert_eq!(r.is_top(p), r.contains(p) && p.y == a.y.min(b.y));
        prop_assert_eq!(r.is_bottom(p), r.contains(p) && p.y == a.y.max(b.y));
    }

    #[test]
    fn prop_corner_order_does_not_matter(a in coord_strategy(), b in coord_strategy()) {
        prop_assert_eq!(
            CellRange::from_coords(a, b).bounds(),
            CellRange::from_coords(b, a).bounds()
        );
    }

    #[test]
    fn prop_fill_never_overlaps_reference(a in coord_strategy(), b in coord_strategy(), p in coord_strategy()) {
        let r = CellRange::from_coords(a, b);
        let fill = FillRange::new(Some(&r), Some(p), Some(FillLimit::Xy));
        prop_assert!(fill.cells().all(|(cell, _)| !r.contains(cell)));
        let chunked: usize = fill.chunks().map(|chunk| chunk.cells().count()).sum();
        prop_assert_eq!(chunked, fill.cells().count());
    }
}

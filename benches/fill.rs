//! Benchmarks for fill chunking and selection serialization.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use std::ops::ControlFlow;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xlgrid::{CellRange, ColumnDef, Coordinate, FillLimit, FillRange, Grid, GridOptions, RowData};

fn grid(rows: usize, columns: usize) -> Grid {
    let columns_def = (0..columns)
        .map(|c| ColumnDef::new(format!("c{c}")).into())
        .collect();
    let rows = (0..rows)
        .map(|r| {
            (0..columns).fold(RowData::new(format!("r{r}")), |row, c| {
                row.with_value(format!("c{c}"), r * columns + c)
            })
        })
        .collect();
    Grid::new(GridOptions {
        columns: columns_def,
        rows,
        ..GridOptions::default()
    })
}

/// Chunk a fill strip of growing length against a three-row reference.
fn bench_chunks(c: &mut Criterion) {
    let reference = CellRange::from_coords(Coordinate::new(0, 0), Coordinate::new(9, 2));
    let mut group = c.benchmark_group("fill_chunks");

    for length in [30, 3_000, 300_000] {
        let fill = FillRange::new(
            Some(&reference),
            Some(Coordinate::new(0, 2 + length)),
            Some(FillLimit::Y),
        );
        group.throughput(Throughput::Elements(u64::from(length.unsigned_abs())));
        group.bench_with_input(BenchmarkId::new("chunks", length), &fill, |b, fill| {
            b.iter(|| black_box(fill).chunks().count())
        });
        group.bench_with_input(BenchmarkId::new("each_with_source", length), &fill, |b, fill| {
            b.iter(|| {
                let mut n = 0usize;
                black_box(fill).each_with_source(|_, _| {
                    n += 1;
                    ControlFlow::Continue(())
                });
                n
            })
        });
    }

    group.finish();
}

/// Serialize a selection the way `copy_selection` does.
fn bench_selection_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_text");

    for (rows, columns) in [(10, 10), (200, 20), (1_000, 50)] {
        let grid = grid(rows, columns);
        let max_x = i32::try_from(columns - 1).expect("column count fits");
        let max_y = i32::try_from(rows - 1).expect("row count fits");
        grid.select_cells(Coordinate::new(0, 0), Coordinate::new(max_x, max_y));

        group.throughput(Throughput::Elements((rows * columns) as u64));
        group.bench_function(BenchmarkId::new("copy", format!("{rows}x{columns}")), |b| {
            b.iter(|| black_box(&grid).selection_text())
        });
    }

    group.finish();
}

/// Fill a pattern down a full column block.
fn bench_apply_filling(c: &mut Criterion) {
    c.bench_function("apply_filling_500_rows", |b| {
        b.iter_with_setup(
            || {
                let grid = grid(500, 5);
                grid.select_cells(Coordinate::new(0, 0), Coordinate::new(4, 1));
                grid.start_filling(Coordinate::new(0, 499));
                grid
            },
            |grid| grid.apply_filling(),
        )
    });
}

criterion_group!(benches, bench_chunks, bench_selection_text, bench_apply_filling);

criterion_main!(benches);

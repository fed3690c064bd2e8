//! Benchmark for frustum grid ticks.
//!
//! TARGET: a 32x32 grid with the default footprint ticks in well under a
//! millisecond, static or turning.
//!
//! Run with: cargo bench --package meadow_rendering --bench frustum_grid_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use meadow_rendering::culling::CellBounds;
use meadow_rendering::{FrustumGrid, GridConfig};

fn benchmark_static_tick(c: &mut Criterion) {
    let mut grid = FrustumGrid::with_config(GridConfig::default()).unwrap();
    grid.update(0.0, 0.0, 0.0);

    c.bench_function("static_tick_32x32", |b| {
        b.iter(|| {
            grid.update(black_box(0.0), black_box(0.0), black_box(0.0));
        });
    });
}

fn benchmark_turning_tick(c: &mut Criterion) {
    let mut grid = FrustumGrid::with_config(GridConfig::default()).unwrap();
    let mut group = c.benchmark_group("turning");
    group.throughput(Throughput::Elements(u64::from(grid.num_cells())));

    group.bench_function("turning_tick_32x32", |b| {
        let mut theta = 0.0f64;
        b.iter(|| {
            theta += 0.01;
            grid.update(0.0, 0.0, black_box(theta));
        });
    });

    group.bench_function("walking_tick_32x32", |b| {
        let mut z = 0.0f64;
        b.iter(|| {
            z += 1.0;
            grid.update(0.0, black_box(z), 0.3);
        });
    });

    group.finish();
}

fn benchmark_overlap_test(c: &mut Criterion) {
    let mut grid = FrustumGrid::with_config(GridConfig::default()).unwrap();
    grid.update(0.0, 0.0, 0.7);
    let footprint = grid.footprint().clone();
    let cell_size = grid.cell_size();

    c.bench_function("sat_cell_overlap", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = (i + 1) % 64;
            black_box(footprint.intersects_cell(&CellBounds::for_cell(i - 32, i / 2, cell_size)))
        });
    });
}

criterion_group!(benches, benchmark_static_tick, benchmark_turning_tick, benchmark_overlap_test);
criterion_main!(benches);

//! Benchmarks for the grid solver.
//!
//! Run with: `cargo bench`

use bevy::math::Vec2;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use spring_grid::config::MAX_GRID_POINTS;
use spring_grid::{ForceField, Grid};

const DT: f32 = 1.0 / 60.0;

fn grid(width: f32, height: f32, max_points: f32) -> Grid {
    Grid::new(width, height, Grid::spacing_for(width, height, max_points)).expect("valid grid")
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_update");

    for max_points in [MAX_GRID_POINTS, 2_500.0, 10_000.0] {
        let mut g = grid(1280.0, 720.0, max_points);
        // Excite the grid so springs are stretched and points moving
        g.apply_force(ForceField::Explosive, 2500.0, Vec2::new(640.0, 360.0), 400.0);
        g.update(DT);

        group.bench_with_input(
            BenchmarkId::from_parameter(g.points().len()),
            &max_points,
            |b, _| b.iter(|| g.update(black_box(DT))),
        );
    }

    group.finish();
}

fn bench_apply_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_apply_force");
    let mut g = grid(1280.0, 720.0, MAX_GRID_POINTS);

    group.bench_function("cursor_push", |b| {
        b.iter(|| {
            g.apply_force(
                ForceField::Explosive,
                black_box(500.0),
                black_box(Vec2::new(640.0, 360.0)),
                150.0,
            )
        })
    });

    group.bench_function("implosion_wide", |b| {
        b.iter(|| {
            g.apply_force(
                ForceField::Implosive,
                black_box(1200.0),
                black_box(Vec2::new(640.0, 360.0)),
                1000.0,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_update, bench_apply_force);
criterion_main!(benches);

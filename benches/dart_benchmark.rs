/*
 * Dart Simulation Benchmark
 *
 * Measures the spatial grid query, the steering computation for a single
 * dart and the full per-tick update for growing populations.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use darts::{Polarity, Simulation, SimulationParams, SpatialGrid, Steering};
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const SIZES: [usize; 4] = [100, 500, 1000, 2000];

fn seeded_simulation(num_darts: usize) -> Simulation {
    let mut simulation = Simulation::new(SimulationParams {
        num_darts,
        seed: Some(42),
        ..SimulationParams::default()
    })
    .unwrap();
    simulation.add_checkpoint(pt2(0.5, 0.5), Polarity::Attract);
    simulation.add_checkpoint(pt2(-0.5, -0.25), Polarity::Repel);
    simulation
}

fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for num_darts in SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_darts), num_darts, |b, &n| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut grid = SpatialGrid::new(50);
            for i in 0..n {
                let p = pt2(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
                grid.insert(i, grid.cell_of(p));
            }

            b.iter(|| black_box(grid.query_neighbors(black_box(pt2(0.1, -0.2)), 0.1).count()));
        });
    }

    group.finish();
}

fn bench_steering(c: &mut Criterion) {
    let mut group = c.benchmark_group("steering");

    for num_darts in SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_darts), num_darts, |b, &n| {
            let simulation = seeded_simulation(n);
            let steering = Steering::new(
                simulation.params(),
                simulation.darts(),
                simulation.grid(),
                simulation.checkpoints(),
            );

            b.iter(|| {
                for i in 0..n {
                    black_box(steering.desired_direction(i, pt2(0.0, 0.0)));
                }
            });
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for num_darts in SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_darts), num_darts, |b, &n| {
            let mut simulation = seeded_simulation(n);
            b.iter(|| simulation.step(black_box(pt2(0.0, 0.0))).unwrap());
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_steering, bench_step
}

criterion_main!(benches);

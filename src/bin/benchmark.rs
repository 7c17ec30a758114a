//! Headless solver benchmark: steps the reference 1280x720 grid at a fixed
//! 60 Hz with seeded random impulses and reports per-frame timing.
//!
//! `cargo run --release --bin benchmark -- [frames] [seed]`
//! With `--features profile` the summary is also printed as JSON.

use std::time::{Duration, Instant};

use bevy::math::Vec2;
use rand::prelude::*;

use spring_grid::config::MAX_GRID_POINTS;
use spring_grid::physics::tuning::Tuning;
use spring_grid::{ForceField, Grid, GridError};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;
const DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: usize = 10_000;
const DEFAULT_SEED: u64 = 0x5eed;

#[derive(Debug)]
#[cfg_attr(feature = "profile", derive(serde::Serialize))]
struct Summary {
    frames: usize,
    seed: u64,
    points: usize,
    springs: usize,
    mean_us: f64,
    p99_us: f64,
    max_us: f64,
    final_kinetic_energy: f32,
    #[cfg(feature = "profile")]
    tuning: Tuning,
}

fn main() -> Result<(), GridError> {
    let mut args = std::env::args().skip(1);
    let frames = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);
    let seed = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let tuning = Tuning::default();
    let mut grid = Grid::new(WIDTH, HEIGHT, Grid::spacing_for(WIDTH, HEIGHT, MAX_GRID_POINTS))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples: Vec<Duration> = Vec::with_capacity(frames);

    for _ in 0..frames {
        let cursor = Vec2::new(rng.random_range(0.0..WIDTH), rng.random_range(0.0..HEIGHT));

        let start = Instant::now();
        grid.apply_force(ForceField::Explosive, tuning.mouse_force, cursor, tuning.mouse_radius);
        // Roughly one frame in ten has a button held
        match rng.random_range(0..20) {
            0 => grid.apply_force(
                ForceField::Explosive,
                tuning.explosive_force,
                cursor,
                tuning.explosive_radius,
            ),
            1 => grid.apply_force(
                ForceField::Implosive,
                tuning.implosive_force,
                cursor,
                tuning.implosive_radius,
            ),
            _ => {}
        }
        grid.update(DT);
        samples.push(start.elapsed());
    }

    samples.sort_unstable();
    let micros = |d: Duration| d.as_secs_f64() * 1e6;
    let total: Duration = samples.iter().sum();
    let summary = Summary {
        frames,
        seed,
        points: grid.points().len(),
        springs: grid.springs().len(),
        mean_us: micros(total) / frames.max(1) as f64,
        p99_us: samples
            .get(samples.len() * 99 / 100)
            .copied()
            .map(micros)
            .unwrap_or_default(),
        max_us: samples.last().copied().map(micros).unwrap_or_default(),
        final_kinetic_energy: grid.kinetic_energy(),
        #[cfg(feature = "profile")]
        tuning,
    };

    println!(
        "{} frames (seed {:#x}), {} points, {} springs: mean {:.2} us, p99 {:.2} us, max {:.2} us, KE {:.3}",
        summary.frames,
        summary.seed,
        summary.points,
        summary.springs,
        summary.mean_us,
        summary.p99_us,
        summary.max_us,
        summary.final_kinetic_energy
    );

    #[cfg(feature = "profile")]
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize summary: {err}"),
    }

    Ok(())
}

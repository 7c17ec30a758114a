use std::ops::RangeInclusive;

use bevy::prelude::*;

/// Point mass integration
pub const DEFAULT_DAMPING: f32 = 0.98;
/// Velocities with a squared magnitude below this snap to zero.
pub const VELOCITY_SNAP_SQ: f32 = 0.001 * 0.001;

/// Springs rest at 95% of their placement distance (persistent pre-tension).
pub const REST_LENGTH_RATIO: f32 = 0.95;

/// Spring policy: (stiffness, damping)
pub const BORDER_ANCHOR_SPRING: (f32, f32) = (10.0, 10.0);
pub const INTERIOR_ANCHOR_SPRING: (f32, f32) = (0.2, 0.2);
pub const STRUCTURAL_SPRING: (f32, f32) = (100.0, 45.0);
/// Every N-th interior row/column is softly tethered to its anchor.
pub const INTERIOR_ANCHOR_STRIDE: usize = 3;

/// Force field
pub const FIELD_SCALE: f32 = 1000.0;
/// Keeps the inverse falloff finite at the field centre.
pub const FIELD_SOFTENING: f32 = 10_000.0;
/// Damping multiplier for points caught in a field (one step only).
pub const FIELD_DAMPING_FACTOR: f32 = 0.6;

/// Grid layout
pub const MAX_GRID_POINTS: f32 = 575.0;
/// Hard cap on lattice sites a grid may allocate.
pub const MAX_LATTICE_SITES: usize = 1 << 22;

/// Driver timing: frames slower than this are skipped entirely.
pub const MAX_FRAME_DELTA: f32 = 0.160;
pub const STATS_INTERVAL_SECS: f32 = 2.0;

/// Tuning defaults and slider ranges
pub const MOUSE_FORCE: f32 = 500.0;
pub const MOUSE_FORCE_RANGE: RangeInclusive<f32> = 100.0..=1000.0;
pub const MOUSE_RADIUS: f32 = 150.0;
pub const MOUSE_RADIUS_RANGE: RangeInclusive<f32> = 25.0..=300.0;
pub const EXPLOSIVE_FORCE: f32 = 1200.0;
pub const EXPLOSIVE_FORCE_RANGE: RangeInclusive<f32> = 100.0..=2500.0;
pub const EXPLOSIVE_RADIUS: f32 = 250.0;
pub const EXPLOSIVE_RADIUS_RANGE: RangeInclusive<f32> = 25.0..=1000.0;
pub const IMPLOSIVE_FORCE: f32 = 1200.0;
pub const IMPLOSIVE_FORCE_RANGE: RangeInclusive<f32> = 100.0..=2500.0;
pub const IMPLOSIVE_RADIUS: f32 = 250.0;
pub const IMPLOSIVE_RADIUS_RANGE: RangeInclusive<f32> = 25.0..=1000.0;
/// Fraction of a range one key press moves a tunable.
pub const TUNING_STEP: f32 = 0.05;

/// Stroke colours cycled by the tuning panel; the first is the default.
pub const STROKE_PALETTE: [Color; 5] = [
    Color::WHITE,
    Color::srgb(0.2, 0.7, 1.0),
    Color::srgb(0.4, 1.0, 0.4),
    Color::srgb(1.0, 0.6, 0.1),
    Color::srgb(1.0, 0.3, 0.6),
];

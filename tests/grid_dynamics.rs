//! Integration tests for the mass-spring grid.
//!
//! These drive the public `Grid`, `Spring` and `PointMass` APIs the same way
//! the frame driver does: forces, then `update`, frame after frame.

use bevy::math::Vec2;
use rand::prelude::*;

use spring_grid::config::DEFAULT_DAMPING;
use spring_grid::physics::End;
use spring_grid::{ForceField, Grid, PointMass, Spring};

const DT: f32 = 1.0 / 60.0;

fn random_vec(rng: &mut StdRng, extent: f32) -> Vec2 {
    Vec2::new(rng.random_range(-extent..extent), rng.random_range(-extent..extent))
}

fn positions(grid: &Grid) -> Vec<Vec2> {
    grid.points().iter().map(|p| p.position).collect()
}

// ============================================================================
// PointMass
// ============================================================================

#[test]
fn test_anchors_never_move() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        let start = random_vec(&mut rng, 1000.0);
        let mut anchor = PointMass::fixed(start);
        for _ in 0..10 {
            anchor.apply_force(random_vec(&mut rng, 1.0e6));
            anchor.increase_damping(0.6);
            anchor.update(rng.random_range(0.0..0.16));
        }
        assert_eq!(anchor.position, start);
        assert_eq!(anchor.velocity, Vec2::ZERO);
    }
}

#[test]
fn test_free_velocity_decays_to_exact_zero() {
    let mut p = PointMass::new(Vec2::ZERO, 1.0);
    p.velocity = Vec2::new(50.0, -20.0);

    let mut previous = p.velocity.length();
    let mut frames = 0;
    while p.velocity != Vec2::ZERO {
        p.update(DT);
        let speed = p.velocity.length();
        assert!(speed <= previous);
        previous = speed;
        frames += 1;
        assert!(frames < 2_000, "velocity never snapped to zero");
    }
    assert_eq!(p.damping(), DEFAULT_DAMPING);
}

// ============================================================================
// Spring
// ============================================================================

#[test]
fn test_slack_springs_exert_nothing() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..100 {
        let a = random_vec(&mut rng, 500.0);
        let b = a + random_vec(&mut rng, 100.0);
        let spring = Spring::new(End::Moving(0), End::Moving(1), 100.0, 45.0, a, b);

        // Pull the second end inside the rest length along the same line
        let mut end1 = PointMass::new(a, 1.0);
        let mut end2 = PointMass::new(a + (b - a) * rng.random_range(0.0..0.9), 1.0);
        end1.velocity = random_vec(&mut rng, 50.0);
        end2.velocity = random_vec(&mut rng, 50.0);
        spring.update(DT, &mut end1, &mut end2);

        assert_eq!(end1.acceleration(), Vec2::ZERO);
        assert_eq!(end2.acceleration(), Vec2::ZERO);
    }
}

#[test]
fn test_spring_forces_are_equal_and_opposite() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let a = random_vec(&mut rng, 500.0);
        let b = random_vec(&mut rng, 500.0);
        let spring = Spring::new(End::Moving(0), End::Moving(1), 100.0, 45.0, a, b);

        let mut end1 = PointMass::new(a + random_vec(&mut rng, 50.0), 1.0);
        let mut end2 = PointMass::new(b + random_vec(&mut rng, 50.0), 1.0);
        end1.velocity = random_vec(&mut rng, 50.0);
        end2.velocity = random_vec(&mut rng, 50.0);
        spring.update(rng.random_range(0.0..0.16), &mut end1, &mut end2);

        assert_eq!(end1.acceleration(), -end2.acceleration());
    }
}

#[test]
fn test_target_length_is_fixed_at_construction() {
    let spring = Spring::new(
        End::Anchor(0),
        End::Moving(0),
        10.0,
        10.0,
        Vec2::ZERO,
        Vec2::new(0.0, 20.0),
    );
    let target = spring.target_length();

    let mut anchor = PointMass::fixed(Vec2::ZERO);
    let mut point = PointMass::new(Vec2::new(0.0, 20.0), 1.0);
    for _ in 0..100 {
        point.apply_force(Vec2::new(0.0, 500.0));
        spring.update(DT, &mut anchor, &mut point);
        point.update(DT);
    }
    assert_eq!(spring.target_length(), target);
    assert_eq!(anchor.position, Vec2::ZERO);
}

// ============================================================================
// Grid construction
// ============================================================================

#[test]
fn test_300_by_300_with_100_spacing_is_3_by_3() {
    let grid = Grid::new(300.0, 300.0, Vec2::new(100.0, 100.0)).expect("valid grid");
    assert_eq!(grid.num_columns(), 3);
    assert_eq!(grid.num_rows(), 3);
    assert_eq!(grid.points().len(), 9);
    // 8 border anchors + 6 horizontal + 6 vertical
    assert_eq!(grid.springs().len(), 20);
}

#[test]
fn test_non_positive_spacing_is_rejected() {
    assert!(Grid::new(300.0, 300.0, Vec2::ZERO).is_err());
    assert!(Grid::new(300.0, 300.0, Vec2::new(10.0, -1.0)).is_err());
    assert!(Grid::new(300.0, 300.0, Vec2::new(f32::INFINITY, 10.0)).is_err());
}

// ============================================================================
// Force fields
// ============================================================================

#[test]
fn test_explosive_and_implosive_differ_only_in_sign() {
    let mut explosive = Grid::new(300.0, 300.0, Vec2::splat(100.0)).expect("valid grid");
    let mut implosive = explosive.clone();
    let centre = Vec2::new(110.0, 95.0);

    explosive.apply_force(ForceField::Explosive, 1000.0, centre, 100.0);
    implosive.apply_force(ForceField::Implosive, 1000.0, centre, 100.0);

    let pushed = explosive.point(1, 1).expect("in grid").acceleration();
    let pulled = implosive.point(1, 1).expect("in grid").acceleration();
    assert_ne!(pushed, Vec2::ZERO);
    assert_eq!(pushed, -pulled);
    assert_eq!(pushed.length(), pulled.length());

    // Explosive pushes away from the centre
    let offset = explosive.point(1, 1).expect("in grid").position - centre;
    assert!(pushed.dot(offset) > 0.0);
}

#[test]
fn test_field_at_centre_is_finite() {
    let mut grid = Grid::new(300.0, 300.0, Vec2::splat(100.0)).expect("valid grid");
    grid.apply_force(ForceField::Implosive, 2500.0, Vec2::new(100.0, 100.0), 50.0);

    let centre = grid.point(1, 1).expect("in grid");
    assert_eq!(centre.acceleration(), Vec2::ZERO);
    assert!(centre.damping() < DEFAULT_DAMPING);
}

#[test]
fn test_points_beyond_radius_are_untouched() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut grid = Grid::new(1280.0, 720.0, Vec2::splat(40.0)).expect("valid grid");

    for _ in 0..20 {
        let centre = Vec2::new(rng.random_range(0.0..1280.0), rng.random_range(0.0..720.0));
        let radius = rng.random_range(25.0..300.0);
        let field = if rng.random_bool(0.5) {
            ForceField::Explosive
        } else {
            ForceField::Implosive
        };

        let mut probe = grid.clone();
        probe.apply_force(field, 1200.0, centre, radius);
        for (before, after) in grid.points().iter().zip(probe.points()) {
            if after.position.distance_squared(centre) >= radius * radius {
                assert_eq!(after.acceleration(), before.acceleration());
                assert_eq!(after.damping(), before.damping());
            }
        }
        grid.update(DT);
    }
}

// ============================================================================
// Frame loop
// ============================================================================

#[test]
fn test_zero_delta_updates_leave_positions_unchanged() {
    let mut grid = Grid::new(640.0, 480.0, Vec2::splat(40.0)).expect("valid grid");
    let start = positions(&grid);
    for _ in 0..100 {
        grid.update(0.0);
    }
    assert_eq!(positions(&grid), start);

    // Also holds for a grid that is already in motion
    grid.apply_force(ForceField::Explosive, 2500.0, Vec2::new(320.0, 240.0), 200.0);
    for _ in 0..5 {
        grid.update(DT);
    }
    let moving = positions(&grid);
    for _ in 0..100 {
        grid.update(0.0);
    }
    assert_eq!(positions(&grid), moving);
}

#[test]
fn test_impulse_rings_then_settles() {
    let mut grid = Grid::new(1280.0, 720.0, Vec2::splat(40.0)).expect("valid grid");
    for _ in 0..10 {
        grid.apply_force(ForceField::Explosive, 2500.0, Vec2::new(640.0, 360.0), 400.0);
        grid.update(DT);
    }
    assert!(grid.kinetic_energy() > 1.0);

    for _ in 0..6_000 {
        grid.update(DT);
    }
    assert!(grid.kinetic_energy() < 1.0e-3);
    assert!(grid.points().iter().all(|p| p.position.is_finite()));
}

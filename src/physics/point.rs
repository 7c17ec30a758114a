use bevy::prelude::*;

use crate::config::{DEFAULT_DAMPING, VELOCITY_SNAP_SQ};

/// A single point mass integrated with semi-implicit Euler.
///
/// Forces accumulate into `acceleration` between integration steps; `update`
/// consumes the accumulator and restores the default damping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMass {
    /// Current position (grid space: origin top-left, +Y down).
    pub position: Vec2,
    pub velocity: Vec2,
    /// 0.0 marks an immovable anchor.
    pub inverse_mass: f32,

    acceleration: Vec2,
    damping: f32,
}

impl PointMass {
    /// Create a point at rest at `position`.
    pub fn new(position: Vec2, inverse_mass: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            inverse_mass,
            acceleration: Vec2::ZERO,
            damping: DEFAULT_DAMPING,
        }
    }

    /// Create an anchor (`inverse_mass == 0`) at `position`.
    pub fn fixed(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }

    pub fn is_fixed(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Acceleration accumulated since the last `update`.
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Damping coefficient the next `update` will apply.
    pub fn damping(&self) -> f32 {
        self.damping
    }

    // --------------------- Forces ---------------------

    /// a += F * (1 / m). Anchors ignore every force.
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force * self.inverse_mass;
    }

    /// Scale damping for the next step only (`factor < 1` bleeds more energy).
    pub fn increase_damping(&mut self, factor: f32) {
        self.damping *= factor;
    }

    // --------------------- Integration ---------------------

    /// One semi-implicit Euler step:
    /// v += a * dt, x += v * dt, then snap tiny velocities and damp.
    ///
    /// Must run exactly once per frame, after every force for that frame.
    pub fn update(&mut self, delta: f32) {
        self.velocity += self.acceleration * delta;
        self.position += self.velocity * delta;
        self.acceleration = Vec2::ZERO;

        if self.velocity.length_squared() < VELOCITY_SNAP_SQ {
            self.velocity = Vec2::ZERO;
        }

        self.velocity *= self.damping;
        self.damping = DEFAULT_DAMPING;
    }

    /// Put the point back at rest at `position`, dropping pending forces.
    pub fn reset_to(&mut self, position: Vec2) {
        *self = Self::new(position, self.inverse_mass);
    }
}

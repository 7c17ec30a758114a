use bevy::prelude::*;

use super::point::PointMass;
use crate::config::REST_LENGTH_RATIO;

/// Which point storage a spring endpoint lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum End {
    /// Index into the grid's moving points.
    Moving(usize),
    /// Index into the grid's fixed anchors.
    Anchor(usize),
}

/// A tension-only damped spring between two point masses.
///
/// Endpoints are handles into storage owned elsewhere (the `Grid`), so a
/// spring never owns or outlives its points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub end1: End,
    pub end2: End,
    pub stiffness: f32,
    pub damping: f32,
    target_length: f32,
}

impl Spring {
    /// Rest length is fixed here at 95% of the current endpoint distance.
    pub fn new(end1: End, end2: End, stiffness: f32, damping: f32, p1: Vec2, p2: Vec2) -> Self {
        Self {
            end1,
            end2,
            stiffness,
            damping,
            target_length: p1.distance(p2) * REST_LENGTH_RATIO,
        }
    }

    pub fn target_length(&self) -> f32 {
        self.target_length
    }

    /// Force on `end2` for this step (`end1` receives the negation).
    ///
    /// `None` while the spring is slack: compression is never resisted.
    pub fn force(&self, end1: &PointMass, end2: &PointMass, delta: f32) -> Option<Vec2> {
        let stretch = end1.position - end2.position;
        let length = stretch.length();
        if length <= self.target_length {
            return None;
        }

        let correction =
            stretch.normalize_or_zero() * (length - self.target_length) * self.stiffness;
        let dv = end2.velocity - end1.velocity;
        Some(correction - dv * self.damping * delta)
    }

    /// Apply this step's force to both endpoints (equal and opposite).
    pub fn update(&self, delta: f32, end1: &mut PointMass, end2: &mut PointMass) {
        if let Some(force) = self.force(end1, end2, delta) {
            end1.apply_force(-force);
            end2.apply_force(force);
        }
    }
}

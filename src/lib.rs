//! Interactive 2D mass-spring grid: a lattice of point masses held together
//! by tension-only damped springs, pushed around by radial force fields and
//! drawn as a wireframe.

pub mod config;
pub mod physics;

pub use physics::{ForceField, Grid, GridError, GridPlugin, PointMass, Spring, Surface};

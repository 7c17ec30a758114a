use std::fmt;

use bevy::prelude::*;
use tracing::info;

use super::point::PointMass;
use super::render::Surface;
use super::spring::{End, Spring};
use crate::config::*;

/// Sign of a radial force field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceField {
    /// Pushes points away from the centre.
    Explosive,
    /// Pulls points toward the centre.
    Implosive,
}

impl ForceField {
    pub fn scale(self) -> f32 {
        match self {
            ForceField::Explosive => FIELD_SCALE,
            ForceField::Implosive => -FIELD_SCALE,
        }
    }
}

/// Construction-time precondition violations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridError {
    /// Spacing components must be finite and strictly positive.
    InvalidSpacing(Vec2),
    /// Width and height must be finite and non-negative.
    InvalidExtent { width: f32, height: f32 },
    /// Rounded dimensions left no rows or no columns.
    Empty { columns: usize, rows: usize },
    /// Rounded dimensions exceed `MAX_LATTICE_SITES`.
    TooLarge { columns: f32, rows: f32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidSpacing(spacing) => {
                write!(f, "grid spacing must be positive and finite, got {spacing}")
            }
            GridError::InvalidExtent { width, height } => {
                write!(f, "grid extent must be non-negative and finite, got {width}x{height}")
            }
            GridError::Empty { columns, rows } => {
                write!(f, "grid would be empty ({columns} columns x {rows} rows)")
            }
            GridError::TooLarge { columns, rows } => {
                write!(
                    f,
                    "grid of {columns} columns x {rows} rows exceeds {MAX_LATTICE_SITES} sites"
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A rectangular lattice of point masses held in shape by springs.
///
/// Moving points and their fixed anchors are stored row-major in two
/// parallel flat arrays; springs refer to them through [`End`] handles.
#[derive(Resource, Clone, Debug)]
pub struct Grid {
    points: Vec<PointMass>,
    fixed_points: Vec<PointMass>,
    springs: Vec<Spring>,
    num_columns: usize,
    num_rows: usize,
    spacing: Vec2,
    /// Wireframe colour; the driver may change it between frames.
    pub stroke_color: Color,
}

impl Grid {
    /// Build a `width` x `height` lattice with `spacing` between neighbours.
    pub fn new(width: f32, height: f32, spacing: Vec2) -> Result<Self, GridError> {
        if !(spacing.is_finite() && spacing.x > 0.0 && spacing.y > 0.0) {
            return Err(GridError::InvalidSpacing(spacing));
        }
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(GridError::InvalidExtent { width, height });
        }

        let (columns, rows) = ((width / spacing.x).round(), (height / spacing.y).round());
        // Also rejects infinities from a tiny spacing before the `as` casts saturate
        let cap = MAX_LATTICE_SITES as f32;
        if !(columns <= cap && rows <= cap) {
            return Err(GridError::TooLarge { columns, rows });
        }

        let (num_columns, num_rows) = (columns as usize, rows as usize);
        if num_columns == 0 || num_rows == 0 {
            return Err(GridError::Empty {
                columns: num_columns,
                rows: num_rows,
            });
        }
        let sites = num_columns
            .checked_mul(num_rows)
            .filter(|&sites| sites <= MAX_LATTICE_SITES)
            .ok_or(GridError::TooLarge { columns, rows })?;

        let mut grid = Self {
            points: Vec::with_capacity(sites),
            fixed_points: Vec::with_capacity(sites),
            springs: Vec::new(),
            num_columns,
            num_rows,
            spacing,
            stroke_color: STROKE_PALETTE[0],
        };
        grid.init_point_masses();
        grid.init_springs();

        info!(
            columns = num_columns,
            rows = num_rows,
            springs = grid.springs.len(),
            "grid built"
        );
        Ok(grid)
    }

    /// Square spacing that fits roughly `max_points` lattice sites in the area.
    pub fn spacing_for(width: f32, height: f32, max_points: f32) -> Vec2 {
        Vec2::splat((width * height / max_points).sqrt())
    }

    fn init_point_masses(&mut self) {
        for row in 0..self.num_rows {
            for column in 0..self.num_columns {
                let site = self.site(row, column);
                self.points.push(PointMass::new(site, 1.0));
                self.fixed_points.push(PointMass::fixed(site));
            }
        }
    }

    fn init_springs(&mut self) {
        let (last_row, last_column) = (self.num_rows - 1, self.num_columns - 1);

        for row in 0..self.num_rows {
            for column in 0..self.num_columns {
                let here = self.index(row, column);

                let on_border = row == 0 || column == 0 || row == last_row || column == last_column;
                if on_border {
                    self.connect(End::Anchor(here), End::Moving(here), BORDER_ANCHOR_SPRING);
                } else if column % INTERIOR_ANCHOR_STRIDE == 0
                    && row % INTERIOR_ANCHOR_STRIDE == 0
                {
                    self.connect(End::Anchor(here), End::Moving(here), INTERIOR_ANCHOR_SPRING);
                }

                if column > 0 {
                    let left = self.index(row, column - 1);
                    self.connect(End::Moving(left), End::Moving(here), STRUCTURAL_SPRING);
                }
                if row > 0 {
                    let up = self.index(row - 1, column);
                    self.connect(End::Moving(up), End::Moving(here), STRUCTURAL_SPRING);
                }
            }
        }
    }

    fn connect(&mut self, end1: End, end2: End, (stiffness, damping): (f32, f32)) {
        let (p1, p2) = (self.end(end1).position, self.end(end2).position);
        self.springs
            .push(Spring::new(end1, end2, stiffness, damping, p1, p2));
    }

    // --------------------- Layout ---------------------

    #[inline]
    fn index(&self, row: usize, column: usize) -> usize {
        row * self.num_columns + column
    }

    #[inline]
    fn site(&self, row: usize, column: usize) -> Vec2 {
        Vec2::new(column as f32 * self.spacing.x, row as f32 * self.spacing.y)
    }

    fn end(&self, end: End) -> &PointMass {
        match end {
            End::Moving(i) => &self.points[i],
            End::Anchor(i) => &self.fixed_points[i],
        }
    }

    /// Both endpoints of a spring, mutably. A spring never joins a point to itself.
    fn ends_mut(&mut self, end1: End, end2: End) -> (&mut PointMass, &mut PointMass) {
        match (end1, end2) {
            (End::Moving(i), End::Moving(j)) => pair_mut(&mut self.points, i, j),
            (End::Anchor(i), End::Anchor(j)) => pair_mut(&mut self.fixed_points, i, j),
            (End::Anchor(i), End::Moving(j)) => (&mut self.fixed_points[i], &mut self.points[j]),
            (End::Moving(i), End::Anchor(j)) => (&mut self.points[i], &mut self.fixed_points[j]),
        }
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn spacing(&self) -> Vec2 {
        self.spacing
    }

    /// Moving point at (`row`, `column`), if inside the lattice.
    pub fn point(&self, row: usize, column: usize) -> Option<&PointMass> {
        (row < self.num_rows && column < self.num_columns)
            .then(|| &self.points[self.index(row, column)])
    }

    /// Fixed anchor at (`row`, `column`), if inside the lattice.
    pub fn anchor(&self, row: usize, column: usize) -> Option<&PointMass> {
        (row < self.num_rows && column < self.num_columns)
            .then(|| &self.fixed_points[self.index(row, column)])
    }

    /// Moving points, row-major.
    pub fn points(&self) -> &[PointMass] {
        &self.points
    }

    /// Springs in insertion order.
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Σ ½|v|² over moving points (unit mass).
    pub fn kinetic_energy(&self) -> f32 {
        self.points
            .iter()
            .map(|p| 0.5 * p.velocity.length_squared())
            .sum()
    }

    // --------------------- Simulation ---------------------

    /// Inject a radial field around `position` for the current frame.
    ///
    /// Points strictly inside `radius` get an inverse-falloff push (or pull)
    /// and extra damping for one step; everything else is untouched.
    pub fn apply_force(&mut self, field: ForceField, force: f32, position: Vec2, radius: f32) {
        let radius_sq = radius * radius;
        let strength = force * field.scale();

        for point in &mut self.points {
            let distance_sq = position.distance_squared(point.position);
            if distance_sq < radius_sq {
                let falloff = strength / (FIELD_SOFTENING + distance_sq);
                let push = (point.position - position) * falloff;
                point.apply_force(push);
                point.increase_damping(FIELD_DAMPING_FACTOR);
            }
        }
    }

    /// Advance the simulation by `delta` seconds: springs first, then points.
    pub fn update(&mut self, delta: f32) {
        for i in 0..self.springs.len() {
            let spring = self.springs[i];
            let (end1, end2) = self.ends_mut(spring.end1, spring.end2);
            spring.update(delta, end1, end2);
        }

        for point in &mut self.points {
            point.update(delta);
        }
    }

    /// Stroke the interior wireframe: rows and columns from 1 onward, each
    /// point joined to its left and upper neighbours inside that region.
    pub fn draw(&self, _delta: f32, surface: &mut impl Surface) {
        surface.set_stroke_color(self.stroke_color);

        for row in 1..self.num_rows {
            for column in 1..self.num_columns {
                let point = self.points[self.index(row, column)].position;

                if column > 1 {
                    let left = self.points[self.index(row, column - 1)].position;
                    stroke_segment(surface, left, point);
                }
                if row > 1 {
                    let up = self.points[self.index(row - 1, column)].position;
                    stroke_segment(surface, up, point);
                }
            }
        }
    }

    /// Return every point to its anchor at rest.
    pub fn reset(&mut self) {
        for (point, anchor) in self.points.iter_mut().zip(&self.fixed_points) {
            point.reset_to(anchor.position);
        }
    }
}

/// Two distinct elements of `slice`, in argument order.
fn pair_mut<T>(slice: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = slice.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = slice.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

fn stroke_segment(surface: &mut impl Surface, from: Vec2, to: Vec2) {
    surface.begin_path();
    surface.move_to(from);
    surface.line_to(to);
    surface.stroke();
}

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::grid::Grid;
use super::systems::CursorState;
use super::tuning::Tuning;

/// Minimal 2D stroke surface, canvas-style: paths are built with
/// `move_to`/`line_to` and emitted by `stroke`.
pub trait Surface {
    fn set_stroke_color(&mut self, color: Color);
    fn begin_path(&mut self);
    fn move_to(&mut self, point: Vec2);
    fn line_to(&mut self, point: Vec2);
    fn stroke(&mut self);
}

/// Window-space → Bevy 2D world-space (origin at the window center, +Y up).
#[inline]
pub fn window_to_world(point: Vec2, half_extents: Vec2) -> Vec2 {
    Vec2::new(point.x - half_extents.x, half_extents.y - point.y)
}

/// `Surface` over immediate-mode gizmos. Input coordinates are window pixels.
pub struct GizmoSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    half_extents: Vec2,
    color: Color,
    path: Vec<Vec2>,
}

impl<'a, 'w, 's> GizmoSurface<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, half_extents: Vec2) -> Self {
        Self {
            gizmos,
            half_extents,
            color: Color::WHITE,
            path: Vec::with_capacity(2),
        }
    }
}

impl Surface for GizmoSurface<'_, '_, '_> {
    fn set_stroke_color(&mut self, color: Color) {
        self.color = color;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Vec2) {
        self.path.clear();
        self.path.push(window_to_world(point, self.half_extents));
    }

    fn line_to(&mut self, point: Vec2) {
        self.path.push(window_to_world(point, self.half_extents));
    }

    fn stroke(&mut self) {
        if self.path.len() < 2 {
            return;
        }
        self.gizmos
            .linestrip_2d(self.path.iter().copied(), self.color);
    }
}

/// Draw the grid wireframe through a gizmo surface.
pub fn draw_grid(
    time: Res<Time>,
    grid: Res<Grid>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut gizmos: Gizmos,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let mut surface = GizmoSurface::new(&mut gizmos, 0.5 * window.size());
    grid.draw(time.delta_secs(), &mut surface);
}

pub fn draw_effector_gizmo(
    mut gizmos: Gizmos,
    cursor: Res<CursorState>,
    tuning: Res<Tuning>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if !cursor.inside {
        return;
    }

    // Show the radius of whichever field the current buttons apply
    let (radius, color) = if buttons.pressed(MouseButton::Left) {
        (tuning.explosive_radius, Color::srgba(1.0, 0.3, 0.1, 0.8))
    } else if buttons.pressed(MouseButton::Right) {
        (tuning.implosive_radius, Color::srgba(0.2, 0.5, 1.0, 0.8))
    } else {
        (tuning.mouse_radius, Color::srgba(1.0, 1.0, 1.0, 0.1))
    };

    let center = window_to_world(cursor.position, 0.5 * window.size());
    gizmos.circle_2d(center, radius, color);
}

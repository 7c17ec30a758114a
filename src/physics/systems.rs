use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tracing::{debug, error, info};

use super::grid::{ForceField, Grid};
use super::tuning::Tuning;
use crate::config::{MAX_FRAME_DELTA, MAX_GRID_POINTS};

/// Cursor in window coordinates (origin top-left, +Y down), matching grid space.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CursorState {
    pub position: Vec2,
    /// Cursor is over the window this frame.
    pub inside: bool,
    /// Cursor position changed since last frame.
    pub moved: bool,
}

/// Spawn the camera and build the grid to fill the primary window.
pub fn spawn_grid(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut exit: MessageWriter<AppExit>,
) {
    commands.spawn(Camera2d);

    let Ok(window) = windows.single() else {
        error!("no primary window; cannot size the grid");
        exit.write(AppExit::error());
        return;
    };

    let (width, height) = (window.width(), window.height());
    let spacing = Grid::spacing_for(width, height, MAX_GRID_POINTS);
    match Grid::new(width, height, spacing) {
        Ok(grid) => {
            commands.insert_resource(grid);
        }
        Err(err) => {
            error!(%err, width, height, "grid construction failed");
            exit.write(AppExit::error());
        }
    }
}

/// Track the cursor each frame; `moved` stands in for a mouse-move event.
pub fn update_cursor(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cursor: ResMut<CursorState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    match window.cursor_position() {
        Some(position) => {
            cursor.moved = cursor.inside && position != cursor.position;
            cursor.position = position;
            cursor.inside = true;
        }
        None => {
            cursor.moved = false;
            cursor.inside = false;
        }
    }
}

/// Small explosive push that follows the cursor while it moves
/// (suppressed while the implosive button is held).
pub fn apply_cursor_force(
    cursor: Res<CursorState>,
    tuning: Res<Tuning>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut grid: ResMut<Grid>,
) {
    if !cursor.moved || buttons.pressed(MouseButton::Right) {
        return;
    }
    grid.apply_force(
        ForceField::Explosive,
        tuning.mouse_force,
        cursor.position,
        tuning.mouse_radius,
    );
}

/// Left button: explosive impulse. Right button: implosive impulse.
pub fn apply_click_impulse(
    cursor: Res<CursorState>,
    tuning: Res<Tuning>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut grid: ResMut<Grid>,
) {
    if !cursor.inside {
        return;
    }
    if buttons.pressed(MouseButton::Left) {
        grid.apply_force(
            ForceField::Explosive,
            tuning.explosive_force,
            cursor.position,
            tuning.explosive_radius,
        );
    } else if buttons.pressed(MouseButton::Right) {
        grid.apply_force(
            ForceField::Implosive,
            tuning.implosive_force,
            cursor.position,
            tuning.implosive_radius,
        );
    }
}

pub fn step_grid(time: Res<Time>, mut grid: ResMut<Grid>) {
    grid.update(time.delta_secs());
}

/// Run condition: skip the whole update/draw pass after a stall.
pub fn frame_within_limit(time: Res<Time>) -> bool {
    let delta = time.delta_secs();
    let ok = delta < MAX_FRAME_DELTA;
    if !ok {
        debug!(delta, "frame skipped");
    }
    ok
}

/// R puts every point back on its anchor.
pub fn reset_on_key(keys: Res<ButtonInput<KeyCode>>, mut grid: ResMut<Grid>) {
    if keys.just_pressed(KeyCode::KeyR) {
        grid.reset();
        info!("grid reset");
    }
}

/// Native-only quit: press Esc or Q to exit the app.
/// (No-op on wasm32.)
pub fn exit_on_esc_or_q_if_native(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if cfg!(not(target_arch = "wasm32")) && keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ]) {
        exit.write(AppExit::Success);
    }
}

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

pub mod grid;
pub mod point;
pub mod render;
pub mod spring;
pub mod systems;
pub mod tuning;

pub use grid::{ForceField, Grid, GridError};
pub use point::PointMass;
pub use render::Surface;
pub use spring::{End, Spring};

use systems::{
    CursorState, apply_click_impulse, apply_cursor_force, exit_on_esc_or_q_if_native,
    frame_within_limit, reset_on_key, spawn_grid, step_grid, update_cursor,
};
use tuning::{Tuning, TuningPanel, log_frame_stats, tuning_panel, ui_side_panel};

/// Plug this into your App with `.add_plugins(GridPlugin)`.
pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((FrameTimeDiagnosticsPlugin::default(), EguiPlugin::default()))
            .init_resource::<CursorState>()
            .init_resource::<Tuning>()
            .init_resource::<TuningPanel>()
            .add_systems(Startup, spawn_grid)
            .add_systems(
                EguiPrimaryContextPass,
                ui_side_panel.run_if(resource_exists::<Grid>),
            )
            // Input and panel work runs every frame, before the simulation
            .add_systems(Update, (update_cursor, exit_on_esc_or_q_if_native))
            .add_systems(
                Update,
                (tuning_panel, reset_on_key, log_frame_stats).run_if(resource_exists::<Grid>),
            )
            // Cursor push is outside the stall guard; it simply accumulates
            .add_systems(
                Update,
                apply_cursor_force
                    .after(update_cursor)
                    .before(apply_click_impulse)
                    .run_if(resource_exists::<Grid>),
            )
            // Forces → springs/points → wireframe, strictly in order
            .add_systems(
                Update,
                (
                    apply_click_impulse,
                    step_grid,
                    render::draw_grid,
                    render::draw_effector_gizmo,
                )
                    .chain()
                    .after(update_cursor)
                    .after(tuning_panel)
                    .after(reset_on_key)
                    .run_if(resource_exists::<Grid>)
                    .run_if(frame_within_limit),
            );
    }
}

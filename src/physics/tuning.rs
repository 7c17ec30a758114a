use std::ops::RangeInclusive;

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use tracing::info;

use super::grid::Grid;
use crate::config::*;

/// Driver-adjustable force field parameters. The grid applies whatever is
/// current; the ranges are enforced here, not in the core.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "profile", derive(serde::Serialize))]
pub struct Tuning {
    pub mouse_force: f32,
    pub mouse_radius: f32,
    pub explosive_force: f32,
    pub explosive_radius: f32,
    pub implosive_force: f32,
    pub implosive_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            mouse_force: MOUSE_FORCE,
            mouse_radius: MOUSE_RADIUS,
            explosive_force: EXPLOSIVE_FORCE,
            explosive_radius: EXPLOSIVE_RADIUS,
            implosive_force: IMPLOSIVE_FORCE,
            implosive_radius: IMPLOSIVE_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Param {
    #[default]
    MouseForce,
    MouseRadius,
    ExplosiveForce,
    ExplosiveRadius,
    ImplosiveForce,
    ImplosiveRadius,
}

impl Param {
    pub const ALL: [Param; 6] = [
        Param::MouseForce,
        Param::MouseRadius,
        Param::ExplosiveForce,
        Param::ExplosiveRadius,
        Param::ImplosiveForce,
        Param::ImplosiveRadius,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Param::MouseForce => "mouse_force",
            Param::MouseRadius => "mouse_radius",
            Param::ExplosiveForce => "explosive_force",
            Param::ExplosiveRadius => "explosive_radius",
            Param::ImplosiveForce => "implosive_force",
            Param::ImplosiveRadius => "implosive_radius",
        }
    }

    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Param::MouseForce => MOUSE_FORCE_RANGE,
            Param::MouseRadius => MOUSE_RADIUS_RANGE,
            Param::ExplosiveForce => EXPLOSIVE_FORCE_RANGE,
            Param::ExplosiveRadius => EXPLOSIVE_RADIUS_RANGE,
            Param::ImplosiveForce => IMPLOSIVE_FORCE_RANGE,
            Param::ImplosiveRadius => IMPLOSIVE_RADIUS_RANGE,
        }
    }
}

impl Tuning {
    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::MouseForce => self.mouse_force,
            Param::MouseRadius => self.mouse_radius,
            Param::ExplosiveForce => self.explosive_force,
            Param::ExplosiveRadius => self.explosive_radius,
            Param::ImplosiveForce => self.implosive_force,
            Param::ImplosiveRadius => self.implosive_radius,
        }
    }

    pub fn get_mut(&mut self, param: Param) -> &mut f32 {
        match param {
            Param::MouseForce => &mut self.mouse_force,
            Param::MouseRadius => &mut self.mouse_radius,
            Param::ExplosiveForce => &mut self.explosive_force,
            Param::ExplosiveRadius => &mut self.explosive_radius,
            Param::ImplosiveForce => &mut self.implosive_force,
            Param::ImplosiveRadius => &mut self.implosive_radius,
        }
    }

    /// Move `param` by `steps` tuning steps, clamped to its range.
    /// Returns the new value.
    pub fn nudge(&mut self, param: Param, steps: f32) -> f32 {
        let range = param.range();
        let step = (range.end() - range.start()) * TUNING_STEP;
        let value = self.get_mut(param);
        *value = (*value + step * steps).clamp(*range.start(), *range.end());
        *value
    }
}

/// Which tunable the arrow keys currently drive, and the palette slot.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct TuningPanel {
    pub selected: Param,
    pub palette_index: usize,
}

const SELECT_KEYS: [KeyCode; 6] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
];

/// Keyboard panel: 1-6 select, Up/Down adjust, C cycles the stroke colour.
pub fn tuning_panel(
    keys: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<TuningPanel>,
    mut tuning: ResMut<Tuning>,
    mut grid: ResMut<Grid>,
) {
    for (key, param) in SELECT_KEYS.iter().zip(Param::ALL) {
        if keys.just_pressed(*key) {
            panel.selected = param;
            info!(param = param.name(), value = tuning.get(param), "tuning selected");
        }
    }

    let steps = if keys.just_pressed(KeyCode::ArrowUp) {
        1.0
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        -1.0
    } else {
        0.0
    };
    if steps != 0.0 {
        let param = panel.selected;
        let value = tuning.nudge(param, steps);
        info!(param = param.name(), value, "tuning changed");
    }

    if keys.just_pressed(KeyCode::KeyC) {
        panel.palette_index = (panel.palette_index + 1) % STROKE_PALETTE.len();
        grid.stroke_color = STROKE_PALETTE[panel.palette_index];
        info!(color = ?grid.stroke_color, "stroke colour changed");
    }
}

/// Periodic stats readout: frame rate and how lively the grid is.
pub fn log_frame_stats(
    time: Res<Time>,
    diagnostics: Res<DiagnosticsStore>,
    grid: Res<Grid>,
    mut since_last: Local<f32>,
) {
    *since_last += time.delta_secs();
    if *since_last < STATS_INTERVAL_SECS {
        return;
    }
    *since_last = 0.0;

    let fps = smoothed_fps(&diagnostics);
    info!(
        fps = format_args!("{fps:.1}"),
        kinetic_energy = grid.kinetic_energy(),
        points = grid.points().len(),
        "frame stats"
    );
}

fn smoothed_fps(diagnostics: &DiagnosticsStore) -> f64 {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or_default()
}

/// egui side panel mirroring the keyboard controls.
pub fn ui_side_panel(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    mut tuning: ResMut<Tuning>,
    mut grid: ResMut<Grid>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let fps = smoothed_fps(&diagnostics);
    let kinetic_energy = grid.kinetic_energy();

    // Edit copies so change detection only fires on a real edit
    let mut edited = *tuning;
    let mut stroke = grid.stroke_color;
    egui::SidePanel::right("tuning_panel").show(ctx, |ui| {
        tuning_controls(ui, &mut edited, &mut stroke, fps, kinetic_energy);
    });

    if edited != *tuning {
        *tuning = edited;
    }
    if stroke != grid.stroke_color {
        grid.stroke_color = stroke;
        info!(color = ?stroke, "stroke colour changed");
    }
}

/// Panel body: one slider per tunable, the stroke picker and a stats readout.
pub fn tuning_controls(
    ui: &mut egui::Ui,
    tuning: &mut Tuning,
    stroke: &mut Color,
    fps: f64,
    kinetic_energy: f32,
) {
    ui.heading("Force fields");
    for param in Param::ALL {
        ui.add(egui::Slider::new(tuning.get_mut(param), param.range()).text(param.name()));
    }

    ui.separator();
    ui.heading("Stroke");
    let srgba = stroke.to_srgba();
    let mut rgb = [srgba.red, srgba.green, srgba.blue];
    if ui.color_edit_button_rgb(&mut rgb).changed() {
        *stroke = Color::srgb(rgb[0], rgb[1], rgb[2]);
    }

    ui.separator();
    ui.label(format!("fps: {fps:.1}"));
    ui.label(format!("kinetic energy: {kinetic_energy:.1}"));
}

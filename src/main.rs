use bevy::prelude::*;

use spring_grid::GridPlugin;

fn main() {
    App::new()
        // Solid black background
        .insert_resource(ClearColor(Color::BLACK))
        // Bevy's core engine features
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "spring grid".into(),
                ..default()
            }),
            ..default()
        }))
        // Grid simulation, input wiring and tuning panel
        .add_plugins(GridPlugin)
        .run();
}

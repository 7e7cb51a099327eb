//! Main binary for running the primitive editor standalone.

use bevy::prelude::*;
use bevy_primitive_editor::EditorPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Primitive Editor".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EditorPlugin)
        .run();
}

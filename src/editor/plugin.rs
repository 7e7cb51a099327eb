use avian3d::prelude::{Physics, PhysicsPlugins};
use avian3d::schedule::PhysicsTime;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::light::DirectionalLightShadowMap;
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::commands::CommandsPlugin;
use crate::constants::camera;
use crate::gizmos::EditorGizmosPlugin;
use crate::scene::ScenePlugin;
use crate::selection::SelectionPlugin;
use crate::ui::UiPlugin;

use super::{EditorCameraPlugin, EditorStatePlugin};

/// Top-level plugin wiring the whole editor together
pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(PhysicsPlugins::default())
            .add_plugins(WireframePlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_plugins(EditorStatePlugin)
            .add_plugins(EditorCameraPlugin)
            .add_plugins(ScenePlugin)
            .add_plugins(SelectionPlugin)
            .add_plugins(EditorGizmosPlugin)
            .add_plugins(CommandsPlugin)
            .add_plugins(UiPlugin)
            .insert_resource(WireframeConfig {
                global: false,
                default_color: Color::WHITE,
            })
            .insert_resource(ClearColor(camera::CLEAR_COLOR))
            .insert_resource(DirectionalLightShadowMap { size: 2048 })
            .add_systems(Startup, (setup_lighting, pause_physics));
    }
}

/// Soft ambient fill plus one shadow-casting key light
fn setup_lighting(mut commands: Commands) {
    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: true,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Colliders are only used for picking, so the simulation never steps
fn pause_physics(mut time: ResMut<Time<Physics>>) {
    time.set_relative_speed(0.0);
}

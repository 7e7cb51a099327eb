use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::ResetViewEvent;
use crate::constants::camera;
use crate::gizmos::GizmoDrag;

/// Pitch is kept just off the poles so look_at never degenerates
const PITCH_EPSILON: f32 = 0.01;

pub struct EditorCameraPlugin;

impl Plugin for EditorCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_editor_camera).add_systems(
            Update,
            (
                orbit_input,
                camera_zoom,
                handle_reset_view,
                update_orbit_camera,
            )
                .chain(),
        );
    }
}

/// Marker component for the editor camera
#[derive(Component)]
pub struct EditorCamera;

/// Damped orbit state around a focus point.
///
/// Input moves the target angles; [`update_orbit_camera`] eases the current
/// angles toward them every frame and writes the camera transform.
#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
}

impl OrbitCamera {
    /// Build an orbit state that places the camera at `position` looking at `focus`
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length().max(camera::MIN_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).asin();
        Self {
            focus,
            yaw,
            pitch,
            distance,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
        }
    }

    /// World position for the current yaw/pitch/distance
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.focus
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    fn orbit(&mut self, delta: Vec2) {
        self.target_yaw -= delta.x * camera::ORBIT_SENSITIVITY;
        // The camera never drops below the ground plane
        self.target_pitch = (self.target_pitch + delta.y * camera::ORBIT_SENSITIVITY)
            .clamp(PITCH_EPSILON, std::f32::consts::FRAC_PI_2 - PITCH_EPSILON);
    }

    fn zoom(&mut self, scroll: f32) {
        self.target_distance = (self.target_distance * (1.0 - scroll * camera::ZOOM_SPEED))
            .clamp(camera::MIN_DISTANCE, camera::MAX_DISTANCE);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(camera::HOME_POSITION, camera::HOME_FOCUS)
    }
}

fn spawn_editor_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    let transform =
        Transform::from_translation(orbit.position()).looking_at(orbit.focus, Vec3::Y);

    commands.spawn((EditorCamera, orbit, Camera3d::default(), transform));
}

/// Orbit with a left-button drag, unless the pointer is on UI or a gizmo handle
fn orbit_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    gizmo_drag: Res<GizmoDrag>,
    mut query: Query<&mut OrbitCamera, With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.pressed(MouseButton::Left) {
        return;
    }

    // A gizmo drag owns the pointer until release
    if gizmo_drag.active() {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let delta = mouse_motion.delta;
    if delta == Vec2::ZERO {
        return;
    }

    for mut orbit in &mut query {
        orbit.orbit(delta);
    }
}

/// Scroll wheel zooms toward/away from the focus point
fn camera_zoom(
    scroll: Res<AccumulatedMouseScroll>,
    mut query: Query<&mut OrbitCamera, With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let scroll_y = scroll.delta.y;
    if scroll_y == 0.0 {
        return;
    }

    for mut orbit in &mut query {
        orbit.zoom(scroll_y);
    }
}

/// Snap the camera back to the home view
fn handle_reset_view(
    mut events: MessageReader<ResetViewEvent>,
    mut query: Query<&mut OrbitCamera, With<EditorCamera>>,
) {
    if events.read().next().is_none() {
        return;
    }

    for mut orbit in &mut query {
        *orbit = OrbitCamera::default();
    }
}

/// Per-frame damping update: ease the current angles toward their targets and
/// write the camera transform
fn update_orbit_camera(
    mut query: Query<(&mut OrbitCamera, &mut Transform), With<EditorCamera>>,
) {
    for (mut orbit, mut transform) in &mut query {
        orbit.yaw += (orbit.target_yaw - orbit.yaw) * camera::DAMPING;
        orbit.pitch += (orbit.target_pitch - orbit.pitch) * camera::DAMPING;
        orbit.distance += (orbit.target_distance - orbit.distance) * camera::DAMPING;

        transform.translation = orbit.position();
        transform.look_at(orbit.focus, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_view_looks_at_the_origin_from_5_5_5() {
        let orbit = OrbitCamera::default();
        let position = orbit.position();

        assert!((position - camera::HOME_POSITION).length() < 1e-4);
        assert_eq!(orbit.focus, Vec3::ZERO);
    }

    #[test]
    fn pitch_is_clamped_at_the_horizon() {
        let mut orbit = OrbitCamera::default();
        // Drag far downward, which would swing the camera below the grid
        orbit.orbit(Vec2::new(0.0, -10_000.0));

        assert!(orbit.target_pitch >= PITCH_EPSILON);

        orbit.orbit(Vec2::new(0.0, 10_000.0));
        assert!(orbit.target_pitch <= std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn zoom_distance_stays_in_bounds() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..100 {
            orbit.zoom(10.0);
        }
        assert!(orbit.target_distance >= camera::MIN_DISTANCE);

        for _ in 0..100 {
            orbit.zoom(-10.0);
        }
        assert!(orbit.target_distance <= camera::MAX_DISTANCE);
    }
}

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::editor::{EditorCamera, GizmoOperation, Tool};
use crate::scene::EulerRotation;
use crate::selection::Selection;
use crate::ui::RefreshInspector;

/// Length of gizmo axes in world units
const GIZMO_LENGTH: f32 = 1.5;

/// Click radius for gizmo axis detection (in world units, scaled by distance)
const GIZMO_CLICK_RADIUS: f32 = 0.15;

/// Radius of the rotation rings
const ROTATE_RING_RADIUS: f32 = 1.2;

const AXIS_X_COLOR: Color = Color::srgb(0.9, 0.2, 0.2);
const AXIS_Y_COLOR: Color = Color::srgb(0.2, 0.9, 0.2);
const AXIS_Z_COLOR: Color = Color::srgb(0.2, 0.4, 0.9);

/// One of the three gizmo axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub fn direction(&self) -> Vec3 {
        match self {
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
        }
    }

    fn color(&self) -> Color {
        match self {
            GizmoAxis::X => AXIS_X_COLOR,
            GizmoAxis::Y => AXIS_Y_COLOR,
            GizmoAxis::Z => AXIS_Z_COLOR,
        }
    }
}

/// The axis handle currently being dragged, if any.
///
/// While a drag is active the orbit camera and click selection ignore the
/// pointer, mirroring the usual transform-controls "dragging" contract.
#[derive(Resource, Default)]
pub struct GizmoDrag {
    pub axis: Option<GizmoAxis>,
}

impl GizmoDrag {
    pub fn active(&self) -> bool {
        self.axis.is_some()
    }
}

pub struct TransformGizmoPlugin;

impl Plugin for TransformGizmoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GizmoDrag>().add_systems(
            Update,
            (
                handle_gizmo_axis_click,
                handle_gizmo_manipulation,
                handle_gizmo_release,
                draw_transform_gizmo,
            )
                .chain(),
        );
    }
}

/// Draw the manipulation gizmo for the selected object, shaped by the active tool
fn draw_transform_gizmo(
    mut gizmos: Gizmos,
    selection: Res<Selection>,
    tool: Res<Tool>,
    drag: Res<GizmoDrag>,
    transforms: Query<&GlobalTransform>,
) {
    let Some(entity) = selection.current() else {
        return;
    };
    let Ok(transform) = transforms.get(entity) else {
        return;
    };
    let Some(operation) = tool.gizmo_operation() else {
        return;
    };

    let pos = transform.translation();

    for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
        // Dim the axes not being dragged
        let color = match drag.axis {
            Some(active) if active != axis => axis.color().with_alpha(0.25),
            _ => axis.color(),
        };
        let dir = axis.direction();

        match operation {
            GizmoOperation::Translate => {
                let end = pos + dir * GIZMO_LENGTH;
                gizmos.line(pos, end, color);
                gizmos.arrow(end - dir * 0.3, end, color);
            }
            GizmoOperation::Scale => {
                let end = pos + dir * GIZMO_LENGTH;
                gizmos.line(pos, end, color);
                gizmos.sphere(Isometry3d::from_translation(end), 0.08, color);
            }
            GizmoOperation::Rotate => {
                gizmos.circle(
                    Isometry3d::new(pos, Quat::from_rotation_arc(Vec3::Z, dir)),
                    ROTATE_RING_RADIUS,
                    color,
                );
            }
        }
    }
}

/// Start a drag when the pointer presses near a gizmo axis
#[allow(clippy::too_many_arguments)]
fn handle_gizmo_axis_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    selection: Res<Selection>,
    tool: Res<Tool>,
    mut drag: ResMut<GizmoDrag>,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    transforms: Query<&GlobalTransform, Without<EditorCamera>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let Some(entity) = selection.current() else {
        return;
    };
    if tool.gizmo_operation().is_none() {
        return;
    }
    let Ok(transform) = transforms.get(entity) else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    let gizmo_pos = transform.translation();
    let camera_distance = (gizmo_pos - camera_transform.translation()).length();
    let click_radius = GIZMO_CLICK_RADIUS * (camera_distance / 5.0).max(1.0);

    let mut closest_axis = None;
    let mut closest_distance = f32::MAX;

    for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
        let axis_end = gizmo_pos + axis.direction() * GIZMO_LENGTH;
        let distance =
            ray_to_segment_distance(ray.origin, ray.direction.into(), gizmo_pos, axis_end);

        if distance < click_radius && distance < closest_distance {
            closest_distance = distance;
            closest_axis = Some(axis);
        }
    }

    drag.axis = closest_axis;
}

/// Apply mouse motion to the selected object while an axis handle is held.
/// Every manipulation frame refreshes the property panel.
#[allow(clippy::too_many_arguments)]
fn handle_gizmo_manipulation(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    drag: Res<GizmoDrag>,
    tool: Res<Tool>,
    selection: Res<Selection>,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    mut transforms: Query<(&mut Transform, &mut EulerRotation), Without<EditorCamera>>,
    mut refresh: MessageWriter<RefreshInspector>,
) {
    let Some(axis) = drag.axis else {
        return;
    };
    if !mouse_button.pressed(MouseButton::Left) {
        return;
    }

    let delta = mouse_motion.delta;
    if delta == Vec2::ZERO {
        return;
    }

    let Some(operation) = tool.gizmo_operation() else {
        return;
    };
    let Some(entity) = selection.current() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok((mut transform, mut euler)) = transforms.get_mut(entity) else {
        return;
    };

    let dir = axis.direction();
    let pos = transform.translation;

    match operation {
        GizmoOperation::Translate => {
            let movement = calculate_axis_movement(camera, camera_transform, pos, dir, delta);
            transform.translation += dir * movement;
        }
        GizmoOperation::Rotate => {
            let amount = calculate_rotation_amount(camera, camera_transform, pos, dir, delta);
            transform.rotation = Quat::from_axis_angle(dir, amount) * transform.rotation;
            *euler = EulerRotation::from_quat(transform.rotation);
        }
        GizmoOperation::Scale => {
            let movement = calculate_axis_movement(camera, camera_transform, pos, dir, delta);
            // No constraint on scale; zero and negative values are allowed
            transform.scale += dir * movement;
        }
    }

    refresh.write(RefreshInspector);
}

/// End the drag when the button is released
fn handle_gizmo_release(mouse_button: Res<ButtonInput<MouseButton>>, mut drag: ResMut<GizmoDrag>) {
    if mouse_button.just_released(MouseButton::Left) {
        drag.axis = None;
    }
}

/// Calculate world-space movement along an axis from a screen-space mouse delta.
///
/// Projects the axis to screen space so the object tracks the mouse 1:1
/// regardless of camera distance or FOV.
fn calculate_axis_movement(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    object_pos: Vec3,
    axis_dir: Vec3,
    mouse_delta: Vec2,
) -> f32 {
    let Ok(screen_pos) = camera.world_to_viewport(camera_transform, object_pos) else {
        return (mouse_delta.x - mouse_delta.y) * 0.01;
    };
    let Ok(screen_axis_pos) = camera.world_to_viewport(camera_transform, object_pos + axis_dir)
    else {
        return (mouse_delta.x - mouse_delta.y) * 0.01;
    };

    let screen_axis_dir = screen_axis_pos - screen_pos;
    let screen_axis_len = screen_axis_dir.length();
    if screen_axis_len < 0.001 {
        // Axis points at/away from the camera
        return -mouse_delta.y * 0.01;
    }

    // screen_axis_len = pixels per world unit along this axis
    let projected_delta = mouse_delta.dot(screen_axis_dir / screen_axis_len);
    projected_delta / screen_axis_len
}

/// Calculate a rotation delta (radians) from a screen-space mouse delta, by
/// projecting the motion onto the screen-space tangent of the rotation ring
fn calculate_rotation_amount(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    object_pos: Vec3,
    rotation_axis: Vec3,
    mouse_delta: Vec2,
) -> f32 {
    let Ok(screen_pos) = camera.world_to_viewport(camera_transform, object_pos) else {
        return (mouse_delta.x - mouse_delta.y) * 0.01;
    };
    let Ok(screen_axis_pos) =
        camera.world_to_viewport(camera_transform, object_pos + rotation_axis)
    else {
        return (mouse_delta.x - mouse_delta.y) * 0.01;
    };

    let screen_axis_dir = screen_axis_pos - screen_pos;
    let screen_axis_len = screen_axis_dir.length();
    if screen_axis_len < 0.001 {
        // Ring faces the camera; horizontal motion rotates
        return -mouse_delta.x * 0.01;
    }

    let screen_axis_normalized = screen_axis_dir / screen_axis_len;
    let screen_tangent = Vec2::new(-screen_axis_normalized.y, screen_axis_normalized.x);
    mouse_delta.dot(screen_tangent) / screen_axis_len
}

/// Shortest distance between a ray and a line segment
fn ray_to_segment_distance(
    ray_origin: Vec3,
    ray_dir: Vec3,
    segment_start: Vec3,
    segment_end: Vec3,
) -> f32 {
    let segment = segment_end - segment_start;
    let w = ray_origin - segment_start;

    let a = ray_dir.dot(ray_dir);
    let b = ray_dir.dot(segment);
    let c = segment.dot(segment);
    let d = ray_dir.dot(w);
    let e = segment.dot(w);

    let denom = a * c - b * b;
    let (mut s, mut t) = if denom.abs() < 1e-6 {
        // Parallel: measure from the segment start
        (0.0, e / c)
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    // Ray parameter must be non-negative, segment parameter within [0, 1]
    s = s.max(0.0);
    t = t.clamp(0.0, 1.0);

    let ray_point = ray_origin + ray_dir * s;
    let segment_point = segment_start + segment * t;
    ray_point.distance(segment_point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hitting_segment_has_zero_distance() {
        let distance = ray_to_segment_distance(
            Vec3::new(0.5, 0.0, -5.0),
            Vec3::Z,
            Vec3::ZERO,
            Vec3::X * 2.0,
        );
        assert!(distance < 1e-4);
    }

    #[test]
    fn ray_passing_beside_segment_measures_the_gap() {
        let distance = ray_to_segment_distance(
            Vec3::new(0.5, 1.0, -5.0),
            Vec3::Z,
            Vec3::ZERO,
            Vec3::X * 2.0,
        );
        assert!((distance - 1.0).abs() < 1e-4);
    }

    #[test]
    fn distance_clamps_past_the_segment_end() {
        let distance = ray_to_segment_distance(
            Vec3::new(3.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::ZERO,
            Vec3::X * 2.0,
        );
        assert!((distance - 1.0).abs() < 1e-4);
    }
}

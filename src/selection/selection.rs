use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::constants::{material, picking};
use crate::editor::EditorCamera;
use crate::gizmos::GizmoDrag;
use crate::scene::SceneObject;
use crate::ui::RefreshInspector;

/// The single selected object, if any.
///
/// Highlighting, gizmo attachment, and the property panel all derive from
/// this one slot. Mutate it through [`SelectMessage`] so observers are
/// notified consistently.
#[derive(Resource, Default)]
pub struct Selection {
    current: Option<Entity>,
}

impl Selection {
    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// Request to change the selection. `None` clears it.
#[derive(Message, Debug, Clone, Copy)]
pub struct SelectMessage(pub Option<Entity>);

/// Announcement of an actual selection change. Not written when the already
/// selected object is selected again.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    pub previous: Option<Entity>,
    pub current: Option<Entity>,
}

/// Tracks which entity currently carries the emissive highlight
#[derive(Resource, Default)]
pub struct Highlighted(Option<Entity>);

pub struct SelectionSystemPlugin;

impl Plugin for SelectionSystemPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>()
            .init_resource::<Highlighted>()
            .add_message::<SelectMessage>()
            .add_message::<SelectionChanged>()
            .add_systems(
                Update,
                (
                    handle_click_selection,
                    apply_selection,
                    sync_selection_highlight,
                )
                    .chain(),
            );
    }
}

/// Apply pending selection requests to the [`Selection`] slot.
///
/// Every request refreshes the property panel, even a redundant re-select of
/// the current object; [`SelectionChanged`] is only announced when the slot
/// actually changes.
pub fn apply_selection(
    mut requests: MessageReader<SelectMessage>,
    mut selection: ResMut<Selection>,
    mut changed: MessageWriter<SelectionChanged>,
    mut refresh: MessageWriter<RefreshInspector>,
) {
    for SelectMessage(target) in requests.read() {
        let previous = selection.current;
        if previous != *target {
            selection.current = *target;
            changed.write(SelectionChanged {
                previous,
                current: *target,
            });
        }
        refresh.write(RefreshInspector);
    }
}

/// Keep the emissive highlight in lockstep with the selection.
///
/// The previous object's emissive is cleared exactly once and the new
/// object's set exactly once per change. A freshly spawned selection whose
/// components have not been flushed yet is picked up on the next frame.
pub fn sync_selection_highlight(
    selection: Res<Selection>,
    mut highlighted: ResMut<Highlighted>,
    handles: Query<&MeshMaterial3d<StandardMaterial>, With<SceneObject>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if highlighted.0 == selection.current {
        return;
    }

    if let Some(previous) = highlighted.0.take() {
        // The previous object may already be despawned; skipping is fine
        if let Ok(handle) = handles.get(previous) {
            if let Some(material) = materials.get_mut(&handle.0) {
                material.emissive = LinearRgba::BLACK;
            }
        }
    }

    if let Some(current) = selection.current {
        let Ok(handle) = handles.get(current) else {
            return;
        };
        if let Some(mat) = materials.get_mut(&handle.0) {
            mat.emissive = material::HIGHLIGHT_EMISSIVE;
        }
        highlighted.0 = Some(current);
    }
}

/// Handle click-to-select by ray casting into the scene.
///
/// A click only counts if the cursor barely moved between press and release,
/// so orbit drags never change the selection. Hitting an object selects it;
/// hitting nothing clears the selection.
#[allow(clippy::too_many_arguments)]
fn handle_click_selection(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    spatial_query: SpatialQuery,
    scene_objects: Query<(), With<SceneObject>>,
    gizmo_drag: Res<GizmoDrag>,
    mut press_start: Local<Option<Vec2>>,
    mut select: MessageWriter<SelectMessage>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        *press_start = None;

        // Presses on UI or on a gizmo handle never begin a selection click
        if let Ok(ctx) = contexts.ctx_mut() {
            if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
                return;
            }
        }
        if gizmo_drag.active() {
            return;
        }

        *press_start = window.cursor_position();
        return;
    }

    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }

    let Some(start) = press_start.take() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    // Moved too far: this was an orbit drag, not a click
    if cursor_position.distance(start) > picking::CLICK_DRAG_THRESHOLD {
        return;
    }

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    let filter = SpatialQueryFilter::default();
    if let Some(hit) = spatial_query.cast_ray(
        ray.origin,
        ray.direction,
        picking::MAX_PICK_DISTANCE,
        true,
        &filter,
    ) {
        if scene_objects.get(hit.entity).is_ok() {
            select.write(SelectMessage(Some(hit.entity)));
            return;
        }
    }

    select.write(SelectMessage(None));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Captures announcements so tests can count them across updates
    #[derive(Resource, Default)]
    struct Recorded {
        changes: Vec<SelectionChanged>,
        refreshes: usize,
    }

    fn record_announcements(
        mut changes: MessageReader<SelectionChanged>,
        mut refreshes: MessageReader<RefreshInspector>,
        mut recorded: ResMut<Recorded>,
    ) {
        recorded.changes.extend(changes.read().copied());
        recorded.refreshes += refreshes.read().count();
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Selection>()
            .init_resource::<Highlighted>()
            .init_resource::<Recorded>()
            .insert_resource(Assets::<StandardMaterial>::default())
            .add_message::<SelectMessage>()
            .add_message::<SelectionChanged>()
            .add_message::<RefreshInspector>()
            .add_systems(
                Update,
                (
                    apply_selection,
                    sync_selection_highlight,
                    record_announcements,
                )
                    .chain(),
            );
        app
    }

    fn spawn_with_material(app: &mut App, id: u32) -> (Entity, Handle<StandardMaterial>) {
        let handle = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let entity = app
            .world_mut()
            .spawn((SceneObject { id }, MeshMaterial3d(handle.clone())))
            .id();
        (entity, handle)
    }

    fn emissive(app: &App, handle: &Handle<StandardMaterial>) -> LinearRgba {
        app.world()
            .resource::<Assets<StandardMaterial>>()
            .get(handle)
            .unwrap()
            .emissive
    }

    fn drain_changes(app: &mut App) -> Vec<SelectionChanged> {
        std::mem::take(&mut app.world_mut().resource_mut::<Recorded>().changes)
    }

    fn refresh_count(app: &mut App) -> usize {
        std::mem::take(&mut app.world_mut().resource_mut::<Recorded>().refreshes)
    }

    #[test]
    fn selecting_an_object_announces_the_change() {
        let mut app = test_app();
        let a = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(SelectMessage(Some(a)));
        app.update();

        assert_eq!(app.world().resource::<Selection>().current(), Some(a));
        assert_eq!(
            drain_changes(&mut app),
            vec![SelectionChanged {
                previous: None,
                current: Some(a)
            }]
        );
    }

    #[test]
    fn reselecting_is_a_refresh_only_no_op() {
        let mut app = test_app();
        let a = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(SelectMessage(Some(a)));
        app.update();
        drain_changes(&mut app);
        refresh_count(&mut app);

        app.world_mut().write_message(SelectMessage(Some(a)));
        app.update();

        assert_eq!(app.world().resource::<Selection>().current(), Some(a));
        assert!(drain_changes(&mut app).is_empty());
        assert_eq!(refresh_count(&mut app), 1);
    }

    #[test]
    fn switching_selection_hands_off_in_one_change() {
        let mut app = test_app();
        let a = app.world_mut().spawn_empty().id();
        let b = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(SelectMessage(Some(a)));
        app.update();
        drain_changes(&mut app);

        app.world_mut().write_message(SelectMessage(Some(b)));
        app.update();

        assert_eq!(app.world().resource::<Selection>().current(), Some(b));
        assert_eq!(
            drain_changes(&mut app),
            vec![SelectionChanged {
                previous: Some(a),
                current: Some(b)
            }]
        );
    }

    #[test]
    fn highlight_hands_off_between_objects() {
        let mut app = test_app();
        let (a, a_mat) = spawn_with_material(&mut app, 1);
        let (b, b_mat) = spawn_with_material(&mut app, 2);

        app.world_mut().write_message(SelectMessage(Some(a)));
        app.update();
        assert_eq!(emissive(&app, &a_mat), material::HIGHLIGHT_EMISSIVE);
        assert_eq!(emissive(&app, &b_mat), LinearRgba::BLACK);

        app.world_mut().write_message(SelectMessage(Some(b)));
        app.update();
        assert_eq!(emissive(&app, &a_mat), LinearRgba::BLACK);
        assert_eq!(emissive(&app, &b_mat), material::HIGHLIGHT_EMISSIVE);

        // Idle frames leave the highlight untouched
        app.update();
        assert_eq!(emissive(&app, &a_mat), LinearRgba::BLACK);
        assert_eq!(emissive(&app, &b_mat), material::HIGHLIGHT_EMISSIVE);

        app.world_mut().write_message(SelectMessage(None));
        app.update();
        assert_eq!(emissive(&app, &b_mat), LinearRgba::BLACK);
    }

    #[test]
    fn clearing_an_empty_selection_announces_nothing() {
        let mut app = test_app();

        app.world_mut().write_message(SelectMessage(None));
        app.update();

        assert!(app.world().resource::<Selection>().is_empty());
        assert!(drain_changes(&mut app).is_empty());
        assert_eq!(refresh_count(&mut app), 1);
    }
}

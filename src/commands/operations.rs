use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::ops;
use crate::scene::{spawn_object, EulerRotation, Primitive, SceneObject, SceneRegistry};
use crate::selection::{SelectMessage, Selection};

/// Event to delete the selected object
#[derive(Message)]
pub struct DeleteSelectedEvent;

/// Event to duplicate the selected object
#[derive(Message)]
pub struct DuplicateSelectedEvent;

pub struct OperationsPlugin;

impl Plugin for OperationsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DeleteSelectedEvent>()
            .add_message::<DuplicateSelectedEvent>()
            .add_systems(
                Update,
                (
                    handle_operation_keys,
                    handle_delete_selected,
                    handle_duplicate_selected,
                ),
            );
    }
}

/// Delete/X deletes the selection, Ctrl+D duplicates it
fn handle_operation_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut delete_events: MessageWriter<DeleteSelectedEvent>,
    mut duplicate_events: MessageWriter<DuplicateSelectedEvent>,
    mut contexts: EguiContexts,
) {
    // Don't fire shortcuts while a text field is focused
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    if keyboard.just_pressed(KeyCode::Delete) || keyboard.just_pressed(KeyCode::KeyX) {
        delete_events.write(DeleteSelectedEvent);
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if ctrl && keyboard.just_pressed(KeyCode::KeyD) {
        duplicate_events.write(DuplicateSelectedEvent);
    }
}

/// Remove the selected object from the registry and the world.
/// A no-op when nothing is selected.
pub fn handle_delete_selected(
    mut events: MessageReader<DeleteSelectedEvent>,
    mut commands: Commands,
    mut registry: ResMut<SceneRegistry>,
    selection: Res<Selection>,
    objects: Query<(&SceneObject, &Name)>,
    mut select: MessageWriter<SelectMessage>,
) {
    for _ in events.read() {
        let Some(entity) = selection.current() else {
            continue;
        };
        if let Ok((object, name)) = objects.get(entity) {
            registry.remove(object.id);
            commands.entity(entity).despawn();
            info!("Deleted {}", name.as_str());
        }
        select.write(SelectMessage(None));
    }
}

/// Create a copy of the selected object and select it.
///
/// The copy keeps the source's kind and transform, carries an independent
/// clone of the material, sits one unit further along X, and is named
/// `"<source name> Copy"`. A no-op when nothing is selected.
#[allow(clippy::too_many_arguments)]
pub fn handle_duplicate_selected(
    mut events: MessageReader<DuplicateSelectedEvent>,
    mut commands: Commands,
    mut registry: ResMut<SceneRegistry>,
    selection: Res<Selection>,
    sources: Query<
        (
            &Primitive,
            &Name,
            &Transform,
            &EulerRotation,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<SceneObject>,
    >,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut select: MessageWriter<SelectMessage>,
) {
    for _ in events.read() {
        let Some(source) = selection.current() else {
            continue;
        };
        let Ok((primitive, name, transform, euler, material_handle)) = sources.get(source) else {
            continue;
        };

        let id = registry.allocate_id();
        let copy_name = format!("{} Copy", name.as_str());

        // Clone the material data so edits to the copy never touch the source
        let material = materials
            .get(&material_handle.0)
            .cloned()
            .unwrap_or_else(|| primitive.kind.create_material());

        let mut copy_transform = *transform;
        copy_transform.translation += ops::DUPLICATE_OFFSET;

        let entity = spawn_object(
            &mut commands,
            &mut meshes,
            &mut materials,
            primitive.kind,
            id,
            &copy_name,
            copy_transform,
            material,
        );
        // Overwrite the derived display angles with the source's stored ones
        commands.entity(entity).insert(*euler);
        registry.insert(id, entity);
        select.write(SelectMessage(Some(entity)));
        info!("Duplicated as {}", copy_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{handle_spawn_primitive, PrimitiveKind, SpawnPrimitiveEvent};
    use crate::selection::{apply_selection, SelectionChanged};
    use crate::ui::RefreshInspector;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<SceneRegistry>()
            .init_resource::<Selection>()
            .insert_resource(Assets::<Mesh>::default())
            .insert_resource(Assets::<StandardMaterial>::default())
            .add_message::<SpawnPrimitiveEvent>()
            .add_message::<SelectMessage>()
            .add_message::<SelectionChanged>()
            .add_message::<RefreshInspector>()
            .add_message::<DeleteSelectedEvent>()
            .add_message::<DuplicateSelectedEvent>()
            .add_systems(
                Update,
                (
                    handle_spawn_primitive,
                    handle_delete_selected,
                    handle_duplicate_selected,
                    apply_selection,
                )
                    .chain(),
            );
        app
    }

    fn spawn(app: &mut App, kind: PrimitiveKind) -> Entity {
        app.world_mut().write_message(SpawnPrimitiveEvent { kind });
        app.update();
        app.world()
            .resource::<Selection>()
            .current()
            .expect("spawned object should be selected")
    }

    #[test]
    fn delete_removes_the_object_and_clears_selection() {
        let mut app = test_app();
        let cube = spawn(&mut app, PrimitiveKind::Cube);
        assert_eq!(app.world().resource::<SceneRegistry>().len(), 1);

        app.world_mut().write_message(DeleteSelectedEvent);
        app.update();

        assert!(app.world().resource::<SceneRegistry>().is_empty());
        assert!(app.world().resource::<Selection>().is_empty());
        assert!(app.world().get::<SceneObject>(cube).is_none());
    }

    #[test]
    fn delete_with_no_selection_is_a_no_op() {
        let mut app = test_app();

        app.world_mut().write_message(DeleteSelectedEvent);
        app.update();

        assert!(app.world().resource::<SceneRegistry>().is_empty());
        assert!(app.world().resource::<Selection>().is_empty());
    }

    #[test]
    fn duplicate_copies_offset_by_one_on_x_with_a_fresh_id() {
        let mut app = test_app();
        let cube = spawn(&mut app, PrimitiveKind::Cube);
        let _sphere = spawn(&mut app, PrimitiveKind::Sphere);

        app.world_mut().write_message(SelectMessage(Some(cube)));
        app.update();
        app.world_mut().get_mut::<Transform>(cube).unwrap().translation.x = 3.5;

        app.world_mut().write_message(DuplicateSelectedEvent);
        app.update();

        let copy = app
            .world()
            .resource::<Selection>()
            .current()
            .expect("the copy should be selected");
        assert_ne!(copy, cube);

        assert_eq!(app.world().get::<SceneObject>(copy).unwrap().id, 3);
        assert_eq!(
            app.world().get::<Name>(copy).unwrap().as_str(),
            "Cube 1 Copy"
        );
        assert_eq!(
            app.world().get::<Transform>(copy).unwrap().translation,
            Vec3::new(4.5, 0.0, 0.0)
        );
        assert_eq!(app.world().resource::<SceneRegistry>().len(), 3);
        assert_eq!(app.world().resource::<SceneRegistry>().get(3), Some(copy));
    }

    #[test]
    fn duplicate_keeps_the_stored_euler_angles() {
        let mut app = test_app();
        let cube = spawn(&mut app, PrimitiveKind::Cube);
        {
            let mut entity = app.world_mut().entity_mut(cube);
            entity.get_mut::<EulerRotation>().unwrap().degrees = Vec3::new(0.0, 100.0, 0.0);
            entity.get_mut::<Transform>().unwrap().rotation =
                Quat::from_rotation_y(100f32.to_radians());
        }

        app.world_mut().write_message(DuplicateSelectedEvent);
        app.update();

        let copy = app.world().resource::<Selection>().current().unwrap();
        assert_eq!(
            app.world().get::<EulerRotation>(copy).unwrap().degrees,
            Vec3::new(0.0, 100.0, 0.0)
        );
    }

    #[test]
    fn duplicate_gets_an_independent_material() {
        let mut app = test_app();
        let cube = spawn(&mut app, PrimitiveKind::Cube);

        app.world_mut().write_message(DuplicateSelectedEvent);
        app.update();

        let copy = app.world().resource::<Selection>().current().unwrap();
        let source_handle = app
            .world()
            .get::<MeshMaterial3d<StandardMaterial>>(cube)
            .unwrap()
            .0
            .clone();
        let copy_handle = app
            .world()
            .get::<MeshMaterial3d<StandardMaterial>>(copy)
            .unwrap()
            .0
            .clone();
        assert_ne!(source_handle, copy_handle);

        // Editing the copy must never touch the source
        let mut materials = app.world_mut().resource_mut::<Assets<StandardMaterial>>();
        materials.get_mut(&copy_handle).unwrap().base_color = Color::srgb(0.0, 1.0, 0.0);
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        assert_eq!(
            materials.get(&source_handle).unwrap().base_color,
            crate::constants::material::DEFAULT_BASE_COLOR
        );
    }

    #[test]
    fn duplicate_with_no_selection_is_a_no_op() {
        let mut app = test_app();

        app.world_mut().write_message(DuplicateSelectedEvent);
        app.update();

        assert!(app.world().resource::<SceneRegistry>().is_empty());
        assert!(app.world().resource::<Selection>().is_empty());
    }
}

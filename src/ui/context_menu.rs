use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::commands::{DeleteSelectedEvent, DuplicateSelectedEvent};
use crate::constants::picking;
use crate::editor::EditorCamera;
use crate::scene::SceneObject;
use crate::selection::SelectMessage;

/// Right-click menu state. Opens over an object, anchored at the cursor.
#[derive(Resource, Default)]
pub struct ContextMenu {
    pub open: bool,
    pub position: Vec2,
}

pub struct ContextMenuPlugin;

impl Plugin for ContextMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContextMenu>()
            .add_systems(Update, handle_context_click)
            .add_systems(EguiPrimaryContextPass, draw_context_menu);
    }
}

/// Right-clicking an object selects it and opens the menu at the cursor.
/// Right-clicking empty space does nothing.
#[allow(clippy::too_many_arguments)]
fn handle_context_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    spatial_query: SpatialQuery,
    scene_objects: Query<(), With<SceneObject>>,
    mut menu: ResMut<ContextMenu>,
    mut select: MessageWriter<SelectMessage>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Right) {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.is_pointer_over_area() {
            return;
        }
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    let hit = spatial_query.cast_ray(
        ray.origin,
        ray.direction,
        picking::MAX_PICK_DISTANCE,
        true,
        &SpatialQueryFilter::default(),
    );

    if let Some(hit) = hit {
        if scene_objects.contains(hit.entity) {
            select.write(SelectMessage(Some(hit.entity)));
            menu.open = true;
            menu.position = cursor_position;
        }
    }
}

fn draw_context_menu(
    mut contexts: EguiContexts,
    mut menu: ResMut<ContextMenu>,
    mut delete_events: MessageWriter<DeleteSelectedEvent>,
    mut duplicate_events: MessageWriter<DuplicateSelectedEvent>,
) -> Result {
    if !menu.open {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    let response = egui::Area::new(egui::Id::new("context_menu"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(menu.position.x, menu.position.y))
        .constrain(true)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(120.0);
                if ui.button("Delete").clicked() {
                    delete_events.write(DeleteSelectedEvent);
                    menu.open = false;
                }
                if ui.button("Duplicate").clicked() {
                    duplicate_events.write(DuplicateSelectedEvent);
                    menu.open = false;
                }
            });
        });

    // Any click outside the menu dismisses it
    if response.response.clicked_elsewhere() {
        menu.open = false;
    }

    Ok(())
}

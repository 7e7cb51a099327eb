use bevy::pbr::wireframe::WireframeConfig;
use bevy::prelude::*;
use bevy_infinite_grid::InfiniteGridSettings;

use crate::commands::DeleteSelectedEvent;
use crate::selection::Selection;

/// The active manipulation tool.
///
/// `Select` behaves as `Translate` for gizmo purposes. `Delete` is special:
/// choosing it while something is selected deletes that object immediately
/// and the tool itself is never entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Resource)]
pub enum Tool {
    #[default]
    Select,
    Translate,
    Rotate,
    Scale,
    Delete,
}

/// How the gizmo interprets a drag on the selected object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoOperation {
    Translate,
    Rotate,
    Scale,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Select,
        Tool::Translate,
        Tool::Rotate,
        Tool::Scale,
        Tool::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Translate => "Move",
            Tool::Rotate => "Rotate",
            Tool::Scale => "Scale",
            Tool::Delete => "Delete",
        }
    }

    /// The gizmo operation this tool maps to, if any.
    /// The Delete tool draws no manipulation gizmo.
    pub fn gizmo_operation(&self) -> Option<GizmoOperation> {
        match self {
            Tool::Select | Tool::Translate => Some(GizmoOperation::Translate),
            Tool::Rotate => Some(GizmoOperation::Rotate),
            Tool::Scale => Some(GizmoOperation::Scale),
            Tool::Delete => None,
        }
    }
}

/// Request to switch the active tool
#[derive(Message, Debug, Clone, Copy)]
pub struct SetToolEvent(pub Tool);

/// Event to toggle wireframe rendering for all objects
#[derive(Message)]
pub struct ToggleWireframeEvent;

/// Event to toggle the ground grid visibility
#[derive(Message)]
pub struct ToggleGridEvent;

/// Event to restore the camera to its home view
#[derive(Message)]
pub struct ResetViewEvent;

pub struct EditorStatePlugin;

impl Plugin for EditorStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Tool>()
            .add_message::<SetToolEvent>()
            .add_message::<ToggleWireframeEvent>()
            .add_message::<ToggleGridEvent>()
            .add_message::<ResetViewEvent>()
            .add_systems(
                Update,
                (handle_set_tool, handle_toggle_wireframe, handle_toggle_grid),
            );
    }
}

/// Apply tool switches, short-circuiting the Delete tool into an immediate
/// delete of the current selection
pub fn handle_set_tool(
    mut events: MessageReader<SetToolEvent>,
    mut tool: ResMut<Tool>,
    selection: Res<Selection>,
    mut delete_events: MessageWriter<DeleteSelectedEvent>,
) {
    for SetToolEvent(requested) in events.read() {
        if *requested == Tool::Delete && !selection.is_empty() {
            delete_events.write(DeleteSelectedEvent);
            continue;
        }
        *tool = *requested;
    }
}

/// Toggle the global wireframe mode.
///
/// Wireframe is a single global flag applied to every current and future
/// object; there is no per-object override.
fn handle_toggle_wireframe(
    mut events: MessageReader<ToggleWireframeEvent>,
    mut config: ResMut<WireframeConfig>,
) {
    for _ in events.read() {
        config.global = !config.global;
        info!("Wireframe: {}", if config.global { "ON" } else { "OFF" });
    }
}

/// Toggle the ground grid visibility
fn handle_toggle_grid(
    mut events: MessageReader<ToggleGridEvent>,
    mut grids: Query<&mut Visibility, With<InfiniteGridSettings>>,
) {
    for _ in events.read() {
        for mut visibility in grids.iter_mut() {
            *visibility = match *visibility {
                Visibility::Inherited | Visibility::Visible => Visibility::Hidden,
                Visibility::Hidden => Visibility::Visible,
            };
            info!(
                "Grid: {}",
                if *visibility == Visibility::Hidden {
                    "HIDDEN"
                } else {
                    "VISIBLE"
                }
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{apply_selection, SelectMessage, SelectionChanged};
    use crate::ui::RefreshInspector;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Tool>()
            .init_resource::<Selection>()
            .add_message::<SetToolEvent>()
            .add_message::<SelectMessage>()
            .add_message::<SelectionChanged>()
            .add_message::<RefreshInspector>()
            .add_message::<DeleteSelectedEvent>()
            .add_systems(Update, (apply_selection, handle_set_tool).chain());
        app
    }

    fn delete_requests(app: &mut App) -> usize {
        let world = app.world_mut();
        let mut count = 0;
        let mut messages = world.resource_mut::<Messages<DeleteSelectedEvent>>();
        messages.drain().for_each(|_| count += 1);
        count
    }

    #[test]
    fn delete_tool_with_no_selection_is_just_recorded() {
        let mut app = test_app();

        app.world_mut().write_message(SetToolEvent(Tool::Delete));
        app.update();

        assert_eq!(*app.world().resource::<Tool>(), Tool::Delete);
        assert_eq!(delete_requests(&mut app), 0);
    }

    #[test]
    fn delete_tool_with_selection_deletes_without_entering() {
        let mut app = test_app();
        let entity = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(SelectMessage(Some(entity)));
        app.update();

        app.world_mut().write_message(SetToolEvent(Tool::Delete));
        app.update();

        assert_eq!(*app.world().resource::<Tool>(), Tool::Select);
        assert_eq!(delete_requests(&mut app), 1);
    }

    #[test]
    fn select_tool_maps_to_translate_gizmo() {
        assert_eq!(
            Tool::Select.gizmo_operation(),
            Some(GizmoOperation::Translate)
        );
        assert_eq!(Tool::Delete.gizmo_operation(), None);
    }
}

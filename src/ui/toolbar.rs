use bevy::pbr::wireframe::WireframeConfig;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use bevy_infinite_grid::InfiniteGridSettings;

use crate::editor::{ResetViewEvent, SetToolEvent, ToggleGridEvent, ToggleWireframeEvent, Tool};
use crate::scene::{PrimitiveKind, SpawnPrimitiveEvent};

pub struct ToolbarPlugin;

impl Plugin for ToolbarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_toolbar);
    }
}

/// Top toolbar: primitive spawn buttons, tool selection, view toggles
#[allow(clippy::too_many_arguments)]
fn draw_toolbar(
    mut contexts: EguiContexts,
    tool: Res<Tool>,
    wireframe: Res<WireframeConfig>,
    grid_query: Query<&Visibility, With<InfiniteGridSettings>>,
    mut spawn_events: MessageWriter<SpawnPrimitiveEvent>,
    mut set_tool: MessageWriter<SetToolEvent>,
    mut toggle_wireframe: MessageWriter<ToggleWireframeEvent>,
    mut toggle_grid: MessageWriter<ToggleGridEvent>,
    mut reset_view: MessageWriter<ResetViewEvent>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Add:");
            for kind in PrimitiveKind::ALL {
                if ui.button(kind.display_name()).clicked() {
                    spawn_events.write(SpawnPrimitiveEvent { kind });
                }
            }

            ui.separator();
            ui.label("Tool:");
            for t in Tool::ALL {
                if ui.selectable_label(*tool == t, t.label()).clicked() {
                    set_tool.write(SetToolEvent(t));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Reset View").clicked() {
                    reset_view.write(ResetViewEvent);
                }

                let grid_visible = grid_query.iter().any(|v| *v != Visibility::Hidden);
                if ui.selectable_label(grid_visible, "Grid").clicked() {
                    toggle_grid.write(ToggleGridEvent);
                }
                if ui.selectable_label(wireframe.global, "Wireframe").clicked() {
                    toggle_wireframe.write(ToggleWireframeEvent);
                }
            });
        });
    });

    Ok(())
}

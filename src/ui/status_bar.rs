use bevy::diagnostic::{DiagnosticsStore, FrameCount, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::RefreshInspector;
use crate::constants::status;
use crate::editor::EditorCamera;
use crate::scene::{SceneObject, SceneRegistry};
use crate::selection::Selection;

/// Cached status line text.
///
/// The object count and selected name are rebuilt as soon as the scene or
/// selection changes; the camera readout only follows the frame cadence.
#[derive(Resource, Default)]
pub struct StatusReadout {
    pub objects: usize,
    pub selected: String,
    pub camera: String,
    pending: bool,
}

pub struct StatusBarPlugin;

impl Plugin for StatusBarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatusReadout>()
            .add_systems(Update, update_status_readout)
            .add_systems(EguiPrimaryContextPass, draw_status_bar);
    }
}

fn update_status_readout(
    frames: Res<FrameCount>,
    mut refreshes: MessageReader<RefreshInspector>,
    registry: Res<SceneRegistry>,
    selection: Res<Selection>,
    names: Query<&Name, With<SceneObject>>,
    camera_query: Query<&Transform, With<EditorCamera>>,
    mut readout: ResMut<StatusReadout>,
) {
    let requested = refreshes.read().count() > 0 || readout.pending;
    let cadence = frames.0 % status::REFRESH_INTERVAL_FRAMES == 0;
    if !requested && !cadence {
        return;
    }

    readout.objects = registry.len();
    match selection.current() {
        Some(entity) => match names.get(entity) {
            Ok(name) => {
                readout.selected = name.to_string();
                readout.pending = false;
            }
            // Selected object spawned this frame; its name lands next frame
            Err(_) => readout.pending = true,
        },
        None => {
            readout.selected = "None".to_string();
            readout.pending = false;
        }
    }

    if cadence {
        if let Ok(transform) = camera_query.single() {
            let p = transform.translation;
            readout.camera = format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z);
        }
    }
}

fn draw_status_bar(
    mut contexts: EguiContexts,
    readout: Res<StatusReadout>,
    diagnostics: Res<DiagnosticsStore>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Objects: {}", readout.objects));
            ui.separator();
            ui.label(format!("Selected: {}", readout.selected));
            ui.separator();
            ui.label(format!("Camera: {}", readout.camera));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(fps) = diagnostics
                    .get(&FrameTimeDiagnosticsPlugin::FPS)
                    .and_then(|d| d.smoothed())
                {
                    ui.label(format!("{fps:.0} FPS"));
                }
            });
        });
    });

    Ok(())
}

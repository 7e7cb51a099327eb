use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::constants::material;
use crate::scene::{EulerRotation, SceneObject};
use crate::selection::Selection;

/// Request to re-read the selected object's properties into the panel.
///
/// Fired whenever the selection or the selected object's state may have
/// changed out from under the panel, so the text fields never go stale.
#[derive(Message)]
pub struct RefreshInspector;

/// Text buffers backing the properties panel.
///
/// Numeric fields are edited as strings and parsed on change, so partial
/// input like `"-"` or `"1."` never fights the user mid-keystroke.
#[derive(Resource)]
pub struct InspectorFields {
    pub name: String,
    pub position: [String; 3],
    pub rotation: [String; 3],
    pub scale: [String; 3],
    pub color: [f32; 3],
    pub opacity: f32,
}

impl Default for InspectorFields {
    fn default() -> Self {
        let srgba = material::DEFAULT_BASE_COLOR.to_srgba();
        Self {
            name: "No selection".to_string(),
            position: Default::default(),
            rotation: Default::default(),
            scale: Default::default(),
            color: [srgba.red, srgba.green, srgba.blue],
            opacity: 1.0,
        }
    }
}

pub struct InspectorPlugin;

impl Plugin for InspectorPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RefreshInspector>()
            .init_resource::<InspectorFields>()
            .add_systems(
                EguiPrimaryContextPass,
                (refresh_inspector_fields, draw_inspector_panel).chain(),
            );
    }
}

/// Repopulate the field buffers from the selected object, or reset them
/// to placeholders when nothing is selected. Only runs on request so
/// in-progress edits aren't clobbered every frame.
fn refresh_inspector_fields(
    mut events: MessageReader<RefreshInspector>,
    selection: Res<Selection>,
    objects: Query<
        (
            &Name,
            &Transform,
            &EulerRotation,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<SceneObject>,
    >,
    materials: Res<Assets<StandardMaterial>>,
    mut fields: ResMut<InspectorFields>,
) {
    if events.read().next().is_none() {
        return;
    }

    let Some(entity) = selection.current() else {
        *fields = InspectorFields::default();
        return;
    };
    let Ok((name, transform, euler, material_handle)) = objects.get(entity) else {
        return;
    };

    fields.name = name.to_string();
    fields.position = format_vec3_fields(transform.translation, 2);
    fields.scale = format_vec3_fields(transform.scale, 2);
    fields.rotation = format_vec3_fields(euler.degrees, 1);

    if let Some(material) = materials.get(&material_handle.0) {
        let srgba = material.base_color.to_srgba();
        fields.color = [srgba.red, srgba.green, srgba.blue];
        fields.opacity = srgba.alpha;
    }
}

/// Properties panel on the right edge. Greyed out with placeholder
/// values while nothing is selected; edits apply to the object as soon
/// as a field changes.
fn draw_inspector_panel(
    mut contexts: EguiContexts,
    selection: Res<Selection>,
    mut fields: ResMut<InspectorFields>,
    mut objects: Query<
        (
            &mut Name,
            &mut Transform,
            &mut EulerRotation,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<SceneObject>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::SidePanel::right("properties_panel")
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Properties");
            ui.separator();

            let selected = selection.current().and_then(|e| objects.get_mut(e).ok());
            let Some((mut name, mut transform, mut euler, material_handle)) = selected else {
                draw_disabled_panel(ui, &mut fields);
                return;
            };

            ui.label("Name:");
            if ui.text_edit_singleline(&mut fields.name).changed() {
                *name = Name::new(fields.name.clone());
            }
            ui.separator();

            let mut transform_changed = false;
            ui.label("Position:");
            transform_changed |= vec3_field_row(ui, &mut fields.position);
            ui.label("Rotation (deg):");
            transform_changed |= vec3_field_row(ui, &mut fields.rotation);
            ui.label("Scale:");
            transform_changed |= vec3_field_row(ui, &mut fields.scale);

            if transform_changed {
                transform.translation = parse_vec3(&fields.position, 0.0);
                euler.degrees = parse_vec3(&fields.rotation, 0.0);
                transform.rotation = rotation_from_degree_fields(&fields.rotation);
                transform.scale = parse_vec3(&fields.scale, 1.0);
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                if ui.color_edit_button_rgb(&mut fields.color).changed() {
                    if let Some(mat) = materials.get_mut(&material_handle.0) {
                        mat.base_color = Color::srgba(
                            fields.color[0],
                            fields.color[1],
                            fields.color[2],
                            fields.opacity,
                        );
                    }
                }
                ui.monospace(hex_color(fields.color));
            });

            ui.horizontal(|ui| {
                ui.label("Opacity:");
                let slider = egui::Slider::new(&mut fields.opacity, 0.0..=1.0).fixed_decimals(1);
                if ui.add(slider).changed() {
                    if let Some(mat) = materials.get_mut(&material_handle.0) {
                        mat.base_color = mat.base_color.with_alpha(fields.opacity);
                        mat.alpha_mode = if fields.opacity < 1.0 {
                            AlphaMode::Blend
                        } else {
                            AlphaMode::Opaque
                        };
                    }
                }
            });
        });

    Ok(())
}

/// Same layout as the live panel, but inert
fn draw_disabled_panel(ui: &mut egui::Ui, fields: &mut InspectorFields) {
    ui.add_enabled_ui(false, |ui| {
        ui.label("Name:");
        ui.text_edit_singleline(&mut fields.name);
        ui.separator();
        ui.label("Position:");
        vec3_field_row(ui, &mut fields.position);
        ui.label("Rotation (deg):");
        vec3_field_row(ui, &mut fields.rotation);
        ui.label("Scale:");
        vec3_field_row(ui, &mut fields.scale);
        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Color:");
            ui.color_edit_button_rgb(&mut fields.color);
        });
        ui.horizontal(|ui| {
            ui.label("Opacity:");
            ui.add(egui::Slider::new(&mut fields.opacity, 0.0..=1.0).fixed_decimals(1));
        });
    });
}

/// One row of X/Y/Z text fields, returning whether any changed
fn vec3_field_row(ui: &mut egui::Ui, buffers: &mut [String; 3]) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        for (label, buffer) in ["X", "Y", "Z"].iter().zip(buffers.iter_mut()) {
            ui.label(*label);
            changed |= ui
                .add(egui::TextEdit::singleline(buffer).desired_width(48.0))
                .changed();
        }
    });
    changed
}

fn format_vec3_fields(value: Vec3, decimals: usize) -> [String; 3] {
    [
        format!("{:.decimals$}", value.x),
        format!("{:.decimals$}", value.y),
        format!("{:.decimals$}", value.z),
    ]
}

/// Parse a numeric field, falling back to `default` on invalid input
pub(crate) fn parse_or(text: &str, default: f32) -> f32 {
    text.trim().parse().unwrap_or(default)
}

fn parse_vec3(buffers: &[String; 3], default: f32) -> Vec3 {
    Vec3::new(
        parse_or(&buffers[0], default),
        parse_or(&buffers[1], default),
        parse_or(&buffers[2], default),
    )
}

/// Rotation fields are edited in degrees, stored as a quaternion
fn rotation_from_degree_fields(buffers: &[String; 3]) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        parse_or(&buffers[0], 0.0).to_radians(),
        parse_or(&buffers[1], 0.0).to_radians(),
        parse_or(&buffers[2], 0.0).to_radians(),
    )
}

fn hex_color(rgb: [f32; 3]) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        (rgb[0] * 255.0).round() as u8,
        (rgb[1] * 255.0).round() as u8,
        (rgb[2] * 255.0).round() as u8,
    )
}

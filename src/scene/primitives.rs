use avian3d::prelude::*;
use bevy::prelude::*;

use super::{SceneObject, SceneRegistry};
use crate::constants::material::DEFAULT_BASE_COLOR;
use crate::selection::SelectMessage;

/// Available primitive shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cylinder,
    Cone,
    Plane,
    Torus,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Cube,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cone,
        PrimitiveKind::Plane,
        PrimitiveKind::Torus,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Cone => "Cone",
            PrimitiveKind::Plane => "Plane",
            PrimitiveKind::Torus => "Torus",
        }
    }

    /// Create the unit-scale mesh for this primitive shape
    pub fn create_mesh(&self) -> Mesh {
        match self {
            PrimitiveKind::Cube => Mesh::from(Cuboid::new(1.0, 1.0, 1.0)),
            PrimitiveKind::Sphere => Mesh::from(Sphere::new(0.5)),
            PrimitiveKind::Cylinder => Mesh::from(Cylinder::new(0.5, 1.0)),
            PrimitiveKind::Cone => Mesh::from(Cone::new(0.5, 1.0)),
            PrimitiveKind::Plane => Plane3d::default().mesh().size(1.0, 1.0).build(),
            PrimitiveKind::Torus => Mesh::from(Torus::new(0.3, 0.7)),
        }
    }

    /// Create the picking collider for this primitive shape.
    ///
    /// The torus has no exact collider, so it is approximated by a cylinder
    /// spanning its outer radius and tube height.
    pub fn create_collider(&self) -> Collider {
        match self {
            PrimitiveKind::Cube => Collider::cuboid(1.0, 1.0, 1.0),
            PrimitiveKind::Sphere => Collider::sphere(0.5),
            PrimitiveKind::Cylinder => Collider::cylinder(0.5, 1.0),
            PrimitiveKind::Cone => Collider::cone(0.5, 1.0),
            PrimitiveKind::Plane => Collider::cuboid(1.0, 0.01, 1.0),
            PrimitiveKind::Torus => Collider::cylinder(0.7, 0.4),
        }
    }

    /// Create the default material for a new object: opaque orange
    pub fn create_material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: DEFAULT_BASE_COLOR,
            ..default()
        }
    }
}

/// Component recording which primitive an object was created as.
/// The kind is immutable after creation; duplication preserves it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Primitive {
    pub kind: PrimitiveKind,
}

/// The object's rotation as XYZ Euler degrees, the authority for display.
///
/// `Quat::to_euler` confines the middle angle to [-90, 90], so angles typed
/// into the panel would not survive a refresh if re-derived from the
/// quaternion. Panel edits write this and derive the quaternion one-way;
/// gizmo rotations recompute it from the quaternion.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct EulerRotation {
    pub degrees: Vec3,
}

impl EulerRotation {
    pub fn from_quat(rotation: Quat) -> Self {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            degrees: Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees()),
        }
    }
}

/// Event to create a new primitive object
#[derive(Message)]
pub struct SpawnPrimitiveEvent {
    pub kind: PrimitiveKind,
}

pub struct PrimitivesPlugin;

impl Plugin for PrimitivesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpawnPrimitiveEvent>()
            .add_systems(Update, handle_spawn_primitive);
    }
}

/// Create, register, and select a new primitive for each spawn request
pub fn handle_spawn_primitive(
    mut events: MessageReader<SpawnPrimitiveEvent>,
    mut commands: Commands,
    mut registry: ResMut<SceneRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut select: MessageWriter<SelectMessage>,
) {
    for event in events.read() {
        let id = registry.allocate_id();
        let name = format!("{} {}", event.kind.display_name(), id);
        let entity = spawn_object(
            &mut commands,
            &mut meshes,
            &mut materials,
            event.kind,
            id,
            &name,
            Transform::default(),
            event.kind.create_material(),
        );
        registry.insert(id, entity);
        select.write(SelectMessage(Some(entity)));
        info!("Added {}", name);
    }
}

/// Spawn a scene object with all required components.
///
/// Every object gets its own material handle so color/opacity edits never
/// bleed between objects. The collider exists only for ray picking; physics
/// simulation is paused at startup.
#[allow(clippy::too_many_arguments)]
pub fn spawn_object(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    kind: PrimitiveKind,
    id: u32,
    name: &str,
    transform: Transform,
    material: StandardMaterial,
) -> Entity {
    commands
        .spawn((
            SceneObject { id },
            Name::new(name.to_string()),
            Primitive { kind },
            EulerRotation::from_quat(transform.rotation),
            Mesh3d(meshes.add(kind.create_mesh())),
            MeshMaterial3d(materials.add(material)),
            transform,
            RigidBody::Static,
            kind.create_collider(),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_kinds_have_distinct_display_names() {
        let names: Vec<&str> = PrimitiveKind::ALL.iter().map(|k| k.display_name()).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name));
        }
    }

    #[test]
    fn default_material_is_opaque_orange() {
        let material = PrimitiveKind::Cube.create_material();
        assert_eq!(material.base_color, DEFAULT_BASE_COLOR);
        assert_eq!(material.base_color.alpha(), 1.0);
    }
}

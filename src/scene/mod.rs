//! Scene object registry and primitive spawning.

mod primitives;

pub use primitives::*;

use std::collections::HashMap;

use bevy::prelude::*;

/// Identity component for user-created scene objects.
///
/// The id is assigned by [`SceneRegistry`] and is unique for the lifetime of
/// the process, even across deletions.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneObject {
    pub id: u32,
}

/// Registry of all user-created objects, keyed by their id.
///
/// Ids come from a monotonic counter and are never reused. Every mapped entity
/// carries a [`SceneObject`] component holding the same id.
#[derive(Resource, Default)]
pub struct SceneRegistry {
    objects: HashMap<u32, Entity>,
    counter: u32,
}

impl SceneRegistry {
    /// Reserve the next object id. Ids start at 1 and only ever grow.
    pub fn allocate_id(&mut self) -> u32 {
        self.counter += 1;
        self.counter
    }

    pub fn insert(&mut self, id: u32, entity: Entity) {
        self.objects.insert(id, entity);
    }

    pub fn remove(&mut self, id: u32) -> Option<Entity> {
        self.objects.remove(&id)
    }

    pub fn get(&self, id: u32) -> Option<Entity> {
        self.objects.get(&id).copied()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over all registered object entities (order is unspecified).
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.objects.values().copied()
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneRegistry>()
            .add_plugins(PrimitivesPlugin);
    }
}

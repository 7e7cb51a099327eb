//! A small 3D primitive editor built on Bevy.
//!
//! Spawn primitives from the toolbar, click to select, drag the axis
//! gizmo to move/rotate/scale, and edit exact values in the properties
//! panel. Right-click an object for delete/duplicate. The viewport has
//! an orbit camera, an infinite ground grid, and global wireframe and
//! grid toggles.
//!
//! # Quick start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_primitive_editor::EditorPlugin;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(EditorPlugin)
//!     .run();
//! ```

pub mod commands;
pub mod constants;
pub mod editor;
pub mod gizmos;
pub mod scene;
pub mod selection;
pub mod ui;

pub use commands::{DeleteSelectedEvent, DuplicateSelectedEvent};
pub use editor::{EditorPlugin, ResetViewEvent, SetToolEvent, Tool};
pub use scene::{Primitive, PrimitiveKind, SceneObject, SceneRegistry, SpawnPrimitiveEvent};
pub use selection::{SelectMessage, Selection, SelectionChanged};

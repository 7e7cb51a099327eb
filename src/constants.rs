//! Centralized constants for the editor
//!
//! This module contains all shared constants like colors, sizes, and default values
//! to ensure consistency across the codebase.

use bevy::prelude::*;

/// Material defaults and selection highlighting
pub mod material {
    use bevy::color::LinearRgba;
    use bevy::prelude::*;

    /// Default base color for freshly created primitives (orange, #ff6b35)
    pub const DEFAULT_BASE_COLOR: Color = Color::srgb(1.0, 0.419_607_85, 0.207_843_14);

    /// Emissive tint applied to the selected object (dark grey, #222222)
    pub const HIGHLIGHT_EMISSIVE: LinearRgba = LinearRgba {
        red: 0.133,
        green: 0.133,
        blue: 0.133,
        alpha: 1.0,
    };
}

/// Viewport and camera defaults
pub mod camera {
    use super::*;

    /// Home position for the editor camera, restored by Reset View
    pub const HOME_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
    /// Point the camera orbits around by default
    pub const HOME_FOCUS: Vec3 = Vec3::ZERO;
    /// Fraction of the remaining angular/zoom distance covered per frame
    pub const DAMPING: f32 = 0.1;
    /// Radians of yaw/pitch per pixel of drag
    pub const ORBIT_SENSITIVITY: f32 = 0.005;
    /// Distance change multiplier per scroll unit
    pub const ZOOM_SPEED: f32 = 0.1;
    /// Closest the camera may get to its focus point
    pub const MIN_DISTANCE: f32 = 1.0;
    /// Farthest the camera may get from its focus point
    pub const MAX_DISTANCE: f32 = 100.0;
    /// Viewport background (#2a2a2a)
    pub const CLEAR_COLOR: Color = Color::srgb(0.164_705_89, 0.164_705_89, 0.164_705_89);
}

/// Picking and pointer behavior
pub mod picking {
    /// Maximum ray distance when picking objects (matches the camera far plane)
    pub const MAX_PICK_DISTANCE: f32 = 1000.0;
    /// Cursor travel (in logical pixels) below which a press/release pair
    /// counts as a click rather than an orbit drag
    pub const CLICK_DRAG_THRESHOLD: f32 = 5.0;
}

/// Object operations
pub mod ops {
    use super::*;

    /// Offset applied to a duplicated object so the copy is visibly distinct
    pub const DUPLICATE_OFFSET: Vec3 = Vec3::new(1.0, 0.0, 0.0);
}

/// Status bar behavior
pub mod status {
    /// The object/selection/camera readout is recomputed every this many frames
    pub const REFRESH_INTERVAL_FRAMES: u32 = 30;
}

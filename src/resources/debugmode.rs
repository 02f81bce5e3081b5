//! Debug toggle resource.
//!
//! The mere presence of this resource enables the debug overlay: hitboxes,
//! the player's foot point, ghost attack radii and the active floor binding.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws the debug overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}

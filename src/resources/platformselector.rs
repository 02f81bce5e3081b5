//! Owned state of the platform selector: the single active floor binding.
use bevy_ecs::prelude::*;

/// The installed player ↔ segment relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorBinding {
    /// Bound [`FloorSegment`](crate::components::platform::FloorSegment) entity.
    pub segment: Entity,
    /// Entity carrying the [`PlatformCollider`](crate::components::platform::PlatformCollider).
    pub handle: Entity,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PlatformSelector {
    pub binding: Option<FloorBinding>,
    /// Number of rebinds since the level was built. Debug overlay only.
    pub rebinds: u32,
}

impl PlatformSelector {
    pub fn bound_segment(&self) -> Option<Entity> {
        self.binding.map(|b| b.segment)
    }

    pub fn is_bound_to(&self, segment: Entity) -> bool {
        self.bound_segment() == Some(segment)
    }
}

//! Floor geometry components.
//!
//! A [`FloorSegment`] is one walkable span: a [`MapPosition`] at its top-left
//! corner plus a [`BoxCollider`] of the span's size. Swaying steps also carry
//! a position tween; every reader takes the current geometry each tick.
//!
//! A [`PlatformCollider`] entity is the collision handle between the player
//! and the one segment it may currently land on. The
//! [`PlatformSelector`](crate::resources::platformselector::PlatformSelector)
//! owns it; there is never more than one.
//!
//! [`MapPosition`]: crate::components::mapposition::MapPosition
//! [`BoxCollider`]: crate::components::boxcollider::BoxCollider

use bevy_ecs::prelude::{Component, Entity};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorSegment {
    /// Floor index counted from the ground floor, `None` for steps between floors.
    pub floor: Option<usize>,
}

/// Installed player ↔ floor collision relationship.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCollider {
    pub body: Entity,
    pub segment: Entity,
}

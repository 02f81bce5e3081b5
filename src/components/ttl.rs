//! Time-to-live component for automatic entity despawning.
//!
//! Thrown yarn balls carry a [`Ttl`]: if they have not hit a ghost when it
//! runs out, [`crate::systems::ttl::ttl_system`] removes them. Hitting a
//! ghost despawns the projectile earlier; the TTL then simply never fires.

use bevy_ecs::prelude::Component;

/// Time-to-live component that automatically despawns entities after a duration.
///
/// The countdown uses the scaled [`WorldTime`](crate::resources::worldtime::WorldTime) delta.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    /// Create a new Ttl with the given duration in seconds.
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}

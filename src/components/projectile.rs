use bevy_ecs::prelude::Component;

/// Thrown ball of yarn. Lifetime is bounded by a [`Ttl`](super::ttl::Ttl).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Projectile;

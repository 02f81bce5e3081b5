//! TTL (time-to-live) system.
//!
//! Thrown balls of yarn carry a [`Ttl`](crate::components::ttl::Ttl) so they
//! disappear on their own when they miss.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Count every TTL down and despawn the entities whose time ran out.
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            debug!("TTL expired for {:?}", entity);
            commands.entity(entity).try_despawn();
        }
    }
}

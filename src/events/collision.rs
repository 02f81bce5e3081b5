//! Overlap notifications and the observer that routes them to the gameplay
//! coordinator.
//!
//! The overlap detector emits one [`CollisionEvent`] per overlapping pair,
//! with the acting entity (player or projectile) in `a`. The observer queues
//! the matching coordinator operation; each operation re-checks its consume
//! guard when it runs, so duplicate events for the same pair are harmless.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::collectible::{Collectible, CollectibleKind};
use crate::components::enemy::Enemy;
use crate::components::hazard::Hazard;
use crate::components::player::Player;
use crate::components::projectile::Projectile;
use crate::systems::gameplay;

/// Event fired when two entities with an enabled BoxCollider overlap.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    /// The actor: the player or a projectile.
    pub a: Entity,
    /// What it touched.
    pub b: Entity,
}

/// Dispatch a [`CollisionEvent`] to `collectKey`, `collectThrowable`,
/// `hitHazard` or `hitEnemyWithProjectile`.
pub fn observe_collision(
    trigger: On<CollisionEvent>,
    mut commands: Commands,
    players: Query<(), With<Player>>,
    projectiles: Query<(), With<Projectile>>,
    collectibles: Query<&Collectible>,
    hazards: Query<(), With<Hazard>>,
    enemies: Query<(), With<Enemy>>,
) {
    let CollisionEvent { a, b } = *trigger.event();

    if players.contains(a) {
        if let Ok(collectible) = collectibles.get(b) {
            match collectible.kind {
                CollectibleKind::Key => commands.queue(move |world: &mut World| {
                    gameplay::collect_key(world, b);
                }),
                CollectibleKind::Yarn => commands.queue(move |world: &mut World| {
                    gameplay::collect_throwable(world, b);
                }),
            }
        } else if hazards.contains(b) {
            commands.queue(move |world: &mut World| {
                gameplay::hit_hazard(world, b);
            });
        }
    } else if projectiles.contains(a) && enemies.contains(b) {
        commands.queue(move |world: &mut World| {
            gameplay::hit_enemy_with_projectile(world, a, b);
        });
    } else {
        debug!("Unhandled collision between {:?} and {:?}", a, b);
    }
}

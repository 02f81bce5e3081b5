//! Overlap detection.
//!
//! Tests the player against live pickups and traps, and every projectile
//! against alive ghosts. Each overlapping pair triggers a
//! [`CollisionEvent`]; the observer in [`crate::events::collision`] decides
//! what it means. Disabled colliders never take part.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::collectible::Collectible;
use crate::components::enemy::Enemy;
use crate::components::hazard::Hazard;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::projectile::Projectile;
use crate::events::collision::CollisionEvent;

#[allow(clippy::type_complexity)]
pub fn collision_detector(
    mut commands: Commands,
    players: Query<(Entity, &MapPosition, &BoxCollider), With<Player>>,
    touchables: Query<
        (Entity, &MapPosition, &BoxCollider, Option<&Collectible>),
        Or<(With<Collectible>, With<Hazard>)>,
    >,
    projectiles: Query<(Entity, &MapPosition, &BoxCollider), With<Projectile>>,
    enemies: Query<(Entity, &MapPosition, &BoxCollider, &Enemy)>,
) {
    for (player, player_pos, player_box) in players.iter() {
        if !player_box.enabled {
            continue;
        }
        for (other, pos, collider, collectible) in touchables.iter() {
            if !collider.enabled || collectible.is_some_and(|c| !c.is_live()) {
                continue;
            }
            if player_box.overlaps(player_pos.pos, collider, pos.pos) {
                commands.trigger(CollisionEvent { a: player, b: other });
            }
        }
    }

    for (projectile, proj_pos, proj_box) in projectiles.iter() {
        for (enemy, pos, collider, state) in enemies.iter() {
            if !state.alive || !collider.enabled {
                continue;
            }
            if proj_box.overlaps(proj_pos.pos, collider, pos.pos) {
                commands.trigger(CollisionEvent {
                    a: projectile,
                    b: enemy,
                });
                break;
            }
        }
    }
}

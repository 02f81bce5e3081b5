//! Ghost behaviour: patrol, lunge at a nearby player, recover.
//!
//! Patrol motion is a ping-pong [`TweenPosition`] set up by the level
//! builder. When the player comes within the attack radius the ghost turns
//! towards them, plays its attack animation and lands one hit through the
//! gameplay coordinator. It patrols again once that animation finishes, so a
//! single attack never repeats mid-animation.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::enemy::{ANIM_GHOST_ATTACK, ANIM_GHOST_FLOAT, Enemy, EnemyState};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::components::tween::TweenPosition;
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::gameplay::Gameplay;
use crate::resources::life::Life;
use crate::systems::gameplay::hit_enemy_contact;

#[allow(clippy::type_complexity)]
pub fn enemy_behavior_system(
    mut commands: Commands,
    gameplay: Res<Gameplay>,
    life: Res<Life>,
    players: Query<&MapPosition, With<Player>>,
    mut enemies: Query<
        (
            Entity,
            &mut Enemy,
            &MapPosition,
            &mut Sprite,
            &mut Animation,
            Option<&mut TweenPosition>,
        ),
        Without<Player>,
    >,
) {
    let Ok(player_pos) = players.single() else {
        return;
    };
    let player_can_be_hit = !life.is_game_over() && !gameplay.falling;

    for (entity, mut enemy, pos, mut sprite, mut anim, tween) in enemies.iter_mut() {
        if !enemy.alive || !gameplay.is_enemy_active(entity) {
            continue;
        }
        if enemy.is_attacking() {
            continue;
        }

        if let Some(tween) = tween.as_ref() {
            // face the direction of travel; the sprite looks right by default
            let heading_right = (tween.to.x >= tween.from.x) == tween.clock.forward;
            sprite.flip_h = !heading_right;
        }

        if player_can_be_hit && pos.distance_to(player_pos) < enemy.attack_radius {
            enemy.state = EnemyState::Attacking;
            sprite.flip_h = player_pos.pos.x < pos.pos.x;
            anim.restart(ANIM_GHOST_ATTACK);
            if let Some(mut tween) = tween {
                tween.clock.playing = false;
            }
            debug!("Ghost {:?} attacks", entity);
            commands.queue(move |world: &mut World| {
                hit_enemy_contact(world, entity);
            });
        }
    }
}

/// Back to patrolling once the attack animation has played out.
pub fn observe_enemy_animation_finished(
    trigger: On<AnimationFinishedEvent>,
    mut enemies: Query<(&mut Enemy, &mut Animation, Option<&mut TweenPosition>)>,
) {
    let event = trigger.event();
    if event.animation_key != ANIM_GHOST_ATTACK {
        return;
    }
    let Ok((mut enemy, mut anim, tween)) = enemies.get_mut(event.entity) else {
        return;
    };
    if !enemy.alive {
        return;
    }
    enemy.state = EnemyState::Patrolling;
    anim.play(ANIM_GHOST_FLOAT);
    if let Some(mut tween) = tween {
        tween.clock.playing = true;
    }
}

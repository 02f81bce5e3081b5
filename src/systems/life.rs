//! Life/damage manager operations.
//!
//! [`take_damage`] is the only way health goes down. It enforces the
//! invulnerability window, drives the red/white/black tint feedback and
//! starts [`game_over`] when the last life is gone. Timed steps go through
//! the [`Scheduler`](crate::resources::scheduler::Scheduler).

use bevy_ecs::prelude::*;
use log::info;

use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::tint::Tint;
use crate::events::audio::{AudioCmd, MUSIC_AMBIENT};
use crate::events::gameplay::GameplayCue;
use crate::resources::life::{
    DamageOutcome, GAME_OVER_RESTART_SECS, INVULNERABILITY_SECS, Life,
};
use crate::resources::scheduler::DeferredAction;
use crate::systems::gameplay::{emit_audio, emit_cue, player_entity, schedule, show_message};

pub const HURT_TINT: u32 = 0xff0000;
pub const NORMAL_TINT: u32 = 0xffffff;
pub const GAME_OVER_TINT: u32 = 0x000000;

fn tint_player(world: &mut World, hex: u32) {
    if let Some(player) = player_entity(world)
        && let Some(mut tint) = world.get_mut::<Tint>(player)
    {
        tint.set_rgb(hex);
    }
}

/// Apply `amount` damage to the player.
///
/// Returns false when the hit was absorbed by the invulnerability window or
/// the game is already over.
pub fn take_damage(world: &mut World, amount: u32) -> bool {
    let (outcome, health) = match world.get_resource_mut::<Life>() {
        Some(mut life) => (life.apply_damage(amount), life.health),
        None => return false,
    };

    match outcome {
        DamageOutcome::Ignored => false,
        DamageOutcome::Hurt => {
            info!("Player hurt, {} lives left", health);
            tint_player(world, HURT_TINT);
            schedule(world, INVULNERABILITY_SECS, DeferredAction::EndInvulnerability);
            emit_cue(world, GameplayCue::HealthChanged { health });
            emit_cue(world, GameplayCue::DamageTaken);
            true
        }
        DamageOutcome::Fatal => {
            emit_cue(world, GameplayCue::HealthChanged { health });
            emit_cue(world, GameplayCue::DamageTaken);
            game_over(world);
            true
        }
    }
}

/// Scheduled end of the invulnerability window.
pub fn end_invulnerability(world: &mut World) {
    let ended = world
        .get_resource_mut::<Life>()
        .is_some_and(|mut life| life.end_invulnerability());
    if ended {
        tint_player(world, NORMAL_TINT);
    }
}

/// Terminal state: freeze the cat, show the notice, restart shortly after.
pub fn game_over(world: &mut World) {
    info!("Game over");
    if let Some(mut life) = world.get_resource_mut::<Life>() {
        life.kill();
    }
    if let Some(player) = player_entity(world)
        && let Some(mut rb) = world.get_mut::<RigidBody>(player)
    {
        rb.stop();
        rb.freeze();
    }
    tint_player(world, GAME_OVER_TINT);
    show_message(world, "GAME OVER", None);
    emit_audio(world, AudioCmd::stop_music(MUSIC_AMBIENT));
    emit_cue(world, GameplayCue::GameOver);
    schedule(world, GAME_OVER_RESTART_SECS, DeferredAction::RestartLevel);
}

/// Grounded flag of the player, false when there is no player.
pub fn player_grounded(world: &mut World) -> bool {
    player_entity(world)
        .and_then(|p| world.get::<Player>(p))
        .is_some_and(|p| p.grounded)
}

//! Gameplay event coordinator.
//!
//! Each public `fn(&mut World, ..)` here is one coordinator operation:
//! picking up keys and yarn, throwing yarn, ghost and trap hits, leaving
//! through the door and restarting the level. They are called from the
//! collision observer, from [`player_actions_system`], from the enemy
//! behaviour and from the scheduler, always with exclusive world access so
//! the consume guards take effect immediately.
//!
//! Consume-once operations never destroy on first contact: they disable the
//! collider and play a short feedback tween. [`DeferredAction::FinishConsume`]
//! removes a collectible afterwards, [`DeferredAction::FinishDefeat`] a ghost.

use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::collectible::{Collectible, CollectibleKind, ConsumeState};
use crate::components::door::Door;
use crate::components::enemy::Enemy;
use crate::components::hazard::Hazard;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::ttl::Ttl;
use crate::components::tween::{Easing, LoopMode, TweenAlpha, TweenPosition, TweenScale};
use crate::components::zindex::ZIndex;
use crate::events::audio::{AudioCmd, AudioMessage, FX_FALL, MUSIC_AMBIENT};
use crate::events::gameplay::GameplayCue;
use crate::resources::camera2d::CameraShake;
use crate::resources::gameplay::{Gameplay, HAZARD_COOLDOWN_SECS};
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::hud::HudMessage;
use crate::resources::input::InputState;
use crate::resources::level::LevelLayout;
use crate::resources::life::Life;
use crate::resources::scheduler::{DeferredAction, Scheduler};
use crate::resources::worldtime::WorldTime;
use crate::systems::life::{player_grounded, take_damage};

/// Length of one leg of the pickup pop; the tween goes there and back.
pub const CONSUME_TWEEN_SECS: f32 = 0.12;
pub const CONSUME_SCALE: f32 = 1.3;
pub const CONSUME_LIFT: f32 = 10.0;

pub const PROJECTILE_SPEED: f32 = 350.0;
pub const PROJECTILE_LIFT: f32 = -200.0;
pub const PROJECTILE_SPIN: f32 = 400.0;
pub const PROJECTILE_BOUNCE: f32 = 0.2;
pub const PROJECTILE_TTL_SECS: f32 = 3.0;
pub const PROJECTILE_SIZE: f32 = 16.0;
pub const YARN_COLOR: u32 = 0xd8435f;

pub const DOOR_UNLOCKED_TINT: u32 = 0xfff176;
pub const DOOR_BLINK_SECS: f32 = 0.5;
pub const DOOR_BLINK_ALPHA: f32 = 0.4;
/// Interact only works this close to the door.
pub const EXIT_RADIUS: f32 = 100.0;

/// A defeated ghost fades and shrinks for this long before it is removed.
pub const DEFEAT_TWEEN_SECS: f32 = 0.4;
pub const DEFEAT_SCALE: f32 = 0.3;

pub const GHOST_KNOCKBACK: Vector2 = Vector2 { x: -200.0, y: -150.0 };
pub const TRAP_KNOCKBACK: Vector2 = Vector2 { x: -150.0, y: -220.0 };
pub const SHAKE_SECS: f32 = 0.12;
pub const SHAKE_INTENSITY: f32 = 0.004;

/// Restart anyway if the fall sound never reports completion.
pub const FALL_RESTART_FALLBACK_SECS: f32 = 4.0;

pub const MSG_YARN: &str = "You picked up a ball of yarn!";
pub const MSG_NO_YARN: &str = "You have no yarn";
pub const MSG_GHOST_DEFEATED: &str = "Ghost defeated!";
pub const MSG_GHOST_HIT: &str = "Ouch! The ghost cat got you";
pub const MSG_TRAP: &str = "Ouch! The ectoplasm burned your paws";
pub const MSG_DOOR_OPEN: &str = "The attic door is open! Press E near it to leave";

// ==================== HELPERS ====================

pub fn player_entity(world: &mut World) -> Option<Entity> {
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.iter(world).next()
}

fn door_entity(world: &mut World) -> Option<Entity> {
    let mut query = world.query_filtered::<Entity, With<Door>>();
    query.iter(world).next()
}

fn now(world: &World) -> f32 {
    world
        .get_resource::<WorldTime>()
        .map(|t| t.elapsed)
        .unwrap_or(0.0)
}

/// Queue a deferred action `delay` seconds from now.
pub fn schedule(world: &mut World, delay: f32, action: DeferredAction) {
    let now = now(world);
    if let Some(mut scheduler) = world.get_resource_mut::<Scheduler>() {
        scheduler.schedule(now, delay, action);
    }
}

/// Show `text` in the centre of the screen, hiding it after `duration`
/// seconds when given.
pub fn show_message(world: &mut World, text: &str, duration: Option<f32>) {
    let Some(token) = world
        .get_resource_mut::<HudMessage>()
        .map(|mut hud| hud.show(text))
    else {
        return;
    };
    if let Some(duration) = duration {
        schedule(world, duration, DeferredAction::ClearMessage { token });
    }
}

pub fn emit_cue(world: &mut World, cue: GameplayCue) {
    if let Some(mut cues) = world.get_resource_mut::<Messages<GameplayCue>>() {
        cues.write(cue);
    }
}

pub fn emit_audio(world: &mut World, cmd: AudioCmd) {
    if let Some(mut audio) = world.get_resource_mut::<Messages<AudioCmd>>() {
        audio.write(cmd);
    }
}

fn shake_camera(world: &mut World) {
    if let Some(mut shake) = world.get_resource_mut::<CameraShake>() {
        shake.start(SHAKE_SECS, SHAKE_INTENSITY);
    }
}

fn knock_back(world: &mut World, player: Entity, impulse: Vector2) {
    if let Some(mut rb) = world.get_mut::<RigidBody>(player) {
        if rb.frozen {
            return;
        }
        let dir = rb.horizontal_direction();
        rb.set_velocity(Vector2::new(impulse.x * dir, impulse.y));
    }
    if let Some(mut p) = world.get_mut::<Player>(player) {
        p.grounded = false;
    }
}

fn game_is_over(world: &World) -> bool {
    world
        .get_resource::<Life>()
        .is_some_and(|life| life.is_game_over())
}

// ==================== COLLECTIBLES ====================

/// Start consuming `entity` if it is a live collectible of `kind`.
fn begin_consume(world: &mut World, entity: Entity, kind: CollectibleKind) -> bool {
    match world.get_mut::<Collectible>(entity) {
        Some(mut collectible) if collectible.is_live() && collectible.kind == kind => {
            collectible.state = ConsumeState::Consuming;
        }
        _ => return false,
    }
    if let Some(mut collider) = world.get_mut::<BoxCollider>(entity) {
        collider.disable();
    }

    let pos = world
        .get::<MapPosition>(entity)
        .map(|p| p.pos)
        .unwrap_or(Vector2::zero());
    let scale = world
        .get::<Scale>(entity)
        .map(|s| s.scale)
        .unwrap_or(Vector2::one());
    world.entity_mut(entity).insert((
        TweenPosition::new(pos, Vector2::new(pos.x, pos.y - CONSUME_LIFT), CONSUME_TWEEN_SECS)
            .with_loop_mode(LoopMode::Yoyo),
        TweenScale::new(scale, scale * CONSUME_SCALE, CONSUME_TWEEN_SECS)
            .with_loop_mode(LoopMode::Yoyo),
    ));
    schedule(
        world,
        CONSUME_TWEEN_SECS * 2.0,
        DeferredAction::FinishConsume(entity),
    );
    true
}

/// First contact with a key. Returns false for duplicate contacts.
pub fn collect_key(world: &mut World, key: Entity) -> bool {
    let started = begin_consume(world, key, CollectibleKind::Key);
    if started {
        debug!("Collecting key {:?}", key);
    }
    started
}

/// First contact with a ball of yarn. Returns false for duplicate contacts.
pub fn collect_throwable(world: &mut World, yarn: Entity) -> bool {
    let started = begin_consume(world, yarn, CollectibleKind::Yarn);
    if started {
        debug!("Collecting yarn {:?}", yarn);
    }
    started
}

/// End of the pickup feedback: remove the entity and count it.
pub fn finish_consume(world: &mut World, entity: Entity) {
    let kind = match world.get::<Collectible>(entity) {
        Some(c) if c.state == ConsumeState::Consuming => c.kind,
        _ => return,
    };
    world.despawn(entity);

    match kind {
        CollectibleKind::Key => {
            let Some((unlocked, collected, total)) =
                world.get_resource_mut::<Gameplay>().map(|mut g| {
                    let unlocked = g.add_key();
                    (unlocked, g.keys_collected, g.total_keys)
                })
            else {
                return;
            };
            info!("Key collected ({}/{})", collected, total);
            emit_cue(world, GameplayCue::KeyCollected { collected, total });
            if unlocked {
                unlock_door(world);
            }
        }
        CollectibleKind::Yarn => {
            let Some(count) = world.get_resource_mut::<Gameplay>().map(|mut g| {
                g.add_throwable();
                g.throwables
            }) else {
                return;
            };
            emit_cue(world, GameplayCue::ThrowableChanged { count });
            show_message(world, MSG_YARN, Some(1.5));
        }
    }
}

/// Tint the door and start its blink. Runs once per level.
pub fn unlock_door(world: &mut World) {
    info!("Door unlocked");
    if let Some(door) = door_entity(world) {
        if let Some(mut d) = world.get_mut::<Door>(door) {
            d.locked = false;
        }
        if let Some(mut tint) = world.get_mut::<Tint>(door) {
            tint.set_rgb(DOOR_UNLOCKED_TINT);
        }
        world.entity_mut(door).insert(
            TweenAlpha::new(1.0, DOOR_BLINK_ALPHA, DOOR_BLINK_SECS)
                .with_easing(Easing::SineInOut)
                .with_loop_mode(LoopMode::PingPong),
        );
    }
    show_message(world, MSG_DOOR_OPEN, Some(1.8));
    emit_cue(world, GameplayCue::DoorUnlocked);
}

// ==================== PROJECTILES & ENEMIES ====================

/// Throw a ball of yarn in the facing direction.
///
/// With none left, shows a notice and changes nothing.
pub fn throw_projectile(world: &mut World) -> Option<Entity> {
    let player = player_entity(world)?;
    if game_is_over(world) {
        return None;
    }

    let taken = world
        .get_resource_mut::<Gameplay>()
        .map(|mut g| g.take_throwable().then_some(g.throwables));
    let count = match taken {
        Some(Some(count)) => count,
        Some(None) => {
            show_message(world, MSG_NO_YARN, Some(0.8));
            emit_cue(world, GameplayCue::ThrowableRejected);
            return None;
        }
        None => return None,
    };

    let origin = world.get::<MapPosition>(player)?.pos;
    let facing = world.get::<Player>(player).map_or(1.0, |p| p.facing);

    let mut body = RigidBody::with_gravity().with_bounce(PROJECTILE_BOUNCE);
    body.set_velocity(Vector2::new(PROJECTILE_SPEED * facing, PROJECTILE_LIFT));
    body.angular_velocity = PROJECTILE_SPIN * facing;

    let projectile = world
        .spawn((
            Projectile,
            MapPosition::new(origin.x, origin.y - 10.0),
            body,
            Rotation::default(),
            BoxCollider::centered(PROJECTILE_SIZE, PROJECTILE_SIZE),
            Sprite::centered(PROJECTILE_SIZE, PROJECTILE_SIZE),
            Scale::default(),
            Tint::rgb(YARN_COLOR),
            ZIndex(5),
            Ttl::new(PROJECTILE_TTL_SECS),
        ))
        .id();

    debug!("Threw yarn {:?}, {} left", projectile, count);
    emit_cue(world, GameplayCue::ThrowableChanged { count });
    emit_cue(world, GameplayCue::ProjectileThrown);
    Some(projectile)
}

/// A ball of yarn struck a ghost.
///
/// The yarn goes away at once. The ghost stops matching anything on this
/// call, fades and shrinks, and [`DeferredAction::FinishDefeat`] removes it.
pub fn hit_enemy_with_projectile(world: &mut World, projectile: Entity, enemy: Entity) -> bool {
    if world.get::<Projectile>(projectile).is_none() {
        return false;
    }
    match world.get_mut::<Enemy>(enemy) {
        Some(mut e) if e.alive => e.alive = false,
        _ => return false,
    }
    if let Some(mut gameplay) = world.get_resource_mut::<Gameplay>() {
        gameplay.remove_enemy(enemy);
    }
    if let Some(mut collider) = world.get_mut::<BoxCollider>(enemy) {
        collider.disable();
    }
    if let Some(mut patrol) = world.get_mut::<TweenPosition>(enemy) {
        patrol.clock.playing = false;
    }
    let opacity = world.get::<Tint>(enemy).map(|t| t.opacity()).unwrap_or(1.0);
    let scale = world
        .get::<Scale>(enemy)
        .map(|s| s.scale)
        .unwrap_or(Vector2::one());
    world.entity_mut(enemy).insert((
        TweenAlpha::new(opacity, 0.0, DEFEAT_TWEEN_SECS).with_easing(Easing::QuadIn),
        TweenScale::new(scale, scale * DEFEAT_SCALE, DEFEAT_TWEEN_SECS)
            .with_easing(Easing::QuadIn),
    ));
    schedule(world, DEFEAT_TWEEN_SECS, DeferredAction::FinishDefeat(enemy));
    world.despawn(projectile);

    info!("Ghost {:?} defeated", enemy);
    show_message(world, MSG_GHOST_DEFEATED, Some(1.0));
    emit_cue(world, GameplayCue::EnemyDefeated);
    true
}

/// End of the defeat fade: remove the ghost.
pub fn finish_defeat(world: &mut World, enemy: Entity) {
    if world.get::<Enemy>(enemy).is_some_and(|e| !e.alive) {
        world.despawn(enemy);
        debug!("Ghost {:?} removed", enemy);
    }
}

/// A ghost attack landed on the player.
pub fn hit_enemy_contact(world: &mut World, enemy: Entity) -> bool {
    let active = world
        .get_resource::<Gameplay>()
        .is_some_and(|g| g.is_enemy_active(enemy));
    let alive = world.get::<Enemy>(enemy).is_some_and(|e| e.alive);
    if !active || !alive || game_is_over(world) {
        return false;
    }
    let Some(player) = player_entity(world) else {
        return false;
    };

    knock_back(world, player, GHOST_KNOCKBACK);
    shake_camera(world);
    let hurt = take_damage(world, 1);
    if !game_is_over(world) {
        show_message(world, MSG_GHOST_HIT, Some(1.0));
    }
    hurt
}

// ==================== HAZARDS ====================

/// The player stepped into an ectoplasm trap.
///
/// Only hurts while grounded, and never twice within the trap cooldown. The
/// cooldown is separate from the invulnerability window.
pub fn hit_hazard(world: &mut World, hazard: Entity) -> bool {
    let Some(damage) = world.get::<Hazard>(hazard).map(|h| h.damage) else {
        return false;
    };
    let Some(player) = player_entity(world) else {
        return false;
    };
    if !player_grounded(world) || game_is_over(world) {
        return false;
    }
    match world.get_resource_mut::<Gameplay>() {
        Some(mut g) if !g.hazard_cooldown => g.hazard_cooldown = true,
        _ => return false,
    }
    schedule(world, HAZARD_COOLDOWN_SECS, DeferredAction::EndHazardCooldown);

    knock_back(world, player, TRAP_KNOCKBACK);
    shake_camera(world);
    let hurt = take_damage(world, damage);
    if !game_is_over(world) {
        show_message(world, MSG_TRAP, Some(1.0));
    }
    hurt
}

pub fn end_hazard_cooldown(world: &mut World) {
    if let Some(mut g) = world.get_resource_mut::<Gameplay>() {
        g.hazard_cooldown = false;
    }
}

// ==================== LEVEL FLOW ====================

/// Leave through the open door when interact is pressed close enough.
pub fn try_exit_level(world: &mut World) -> bool {
    let door_open = world
        .get_resource::<Gameplay>()
        .is_some_and(|g| g.door_open);
    let pressed = world
        .get_resource::<InputState>()
        .is_some_and(|i| i.interact.just_pressed);
    if !door_open || !pressed {
        return false;
    }
    let (Some(player), Some(door)) = (player_entity(world), door_entity(world)) else {
        return false;
    };
    if world.get::<Door>(door).is_none_or(|d| d.locked) {
        return false;
    }
    let (Some(p), Some(d)) = (
        world.get::<MapPosition>(player).copied(),
        world.get::<MapPosition>(door).copied(),
    ) else {
        return false;
    };
    if p.distance_to(&d) >= EXIT_RADIUS {
        return false;
    }

    world.entity_mut(door).remove::<TweenAlpha>();
    if let Some(mut tint) = world.get_mut::<Tint>(door) {
        tint.set_opacity(1.0);
    }
    emit_audio(world, AudioCmd::stop_music(MUSIC_AMBIENT));
    emit_cue(world, GameplayCue::LevelExit);
    if let Some(mut next) = world.get_resource_mut::<NextGameState>() {
        next.set(GameStates::Ending);
    }
    info!("Level exit");
    true
}

/// Rebuild the level from scratch by re-entering the playing state.
pub fn reset_level(world: &mut World) {
    info!("Resetting level");
    emit_audio(world, AudioCmd::stop_music(MUSIC_AMBIENT));
    if let Some(mut next) = world.get_resource_mut::<NextGameState>() {
        next.set(GameStates::Playing);
    }
}

/// The player dropped out of the house: freeze, play the fall sound and wait
/// for it to finish before restarting.
pub fn start_fall(world: &mut World) {
    match world.get_resource_mut::<Gameplay>() {
        Some(mut g) if !g.falling => g.falling = true,
        _ => return,
    }
    info!("Player fell out of the house");
    if let Some(player) = player_entity(world)
        && let Some(mut rb) = world.get_mut::<RigidBody>(player)
    {
        rb.stop();
        rb.freeze();
    }
    if let Some(mut life) = world.get_resource_mut::<Life>() {
        life.kill();
    }
    emit_audio(world, AudioCmd::stop_music(MUSIC_AMBIENT));
    emit_cue(world, GameplayCue::Fell);
    schedule(
        world,
        FALL_RESTART_FALLBACK_SECS,
        DeferredAction::RestartLevel,
    );
}

// ==================== SYSTEMS ====================

/// Throw and exit requests from the keyboard.
pub fn player_actions_system(world: &mut World) {
    let Some((throw, interact)) = world
        .get_resource::<InputState>()
        .map(|i| (i.throw.just_pressed, i.interact.just_pressed))
    else {
        return;
    };
    let falling = world
        .get_resource::<Gameplay>()
        .is_some_and(|g| g.falling);
    if falling || game_is_over(world) {
        return;
    }
    if throw {
        throw_projectile(world);
    }
    if interact {
        try_exit_level(world);
    }
}

/// Start the fall sequence once the player is below the fall threshold.
pub fn fall_detection_system(world: &mut World) {
    let Some(threshold) = world
        .get_resource::<LevelLayout>()
        .map(|l| l.fall_threshold())
    else {
        return;
    };
    let Some(player) = player_entity(world) else {
        return;
    };
    let below = world
        .get::<MapPosition>(player)
        .is_some_and(|p| p.pos.y > threshold);
    let already = world
        .get_resource::<Gameplay>()
        .is_none_or(|g| g.falling);
    if below && !already {
        start_fall(world);
    }
}

/// Restart once the fall sound has finished playing.
pub fn fall_recovery_system(
    mut reader: MessageReader<AudioMessage>,
    gameplay: Res<Gameplay>,
    mut commands: Commands,
) {
    let finished = reader
        .read()
        .any(|msg| matches!(msg, AudioMessage::FxFinished { id } if id == FX_FALL));
    if finished && gameplay.falling {
        commands.queue(|world: &mut World| {
            reset_level(world);
        });
    }
}

//! Scene hooks, level builder and schedule wiring.
//!
//! The scene hooks (`setup`, `enter_play`, `clean_level`, `enter_ending`,
//! `quit_game`) are registered in the [`SystemsStore`] and run by the game
//! state observer on transitions. [`spawn_level`] turns the
//! [`LevelLayout`] resource into entities.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::collectible::Collectible;
use crate::components::door::Door;
use crate::components::enemy::{ANIM_GHOST_FLOAT, Enemy};
use crate::components::hazard::Hazard;
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::platform::FloorSegment;
use crate::components::player::{Player, Posture};
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::tween::{Easing, LoopMode, TweenPosition};
use crate::components::zindex::ZIndex;
use crate::events::audio::{
    AudioCmd, FX_CAT, FX_FALL, FX_HURT, FX_KEY, FX_WIN, MUSIC_AMBIENT,
};
use crate::events::collision::observe_collision;
use crate::events::gameplay::GameplayCue;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::animationstore::AnimationStore;
use crate::resources::audio::init_audio_messages;
use crate::resources::camera2d::{Camera2DRes, CameraShake};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gameplay::Gameplay;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::hud::HudMessage;
use crate::resources::input::InputState;
use crate::resources::level::{LevelLayout, SegmentKind};
use crate::resources::life::Life;
use crate::resources::platformselector::PlatformSelector;
use crate::resources::scheduler::Scheduler;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::audio::{gameplay_cue_audio, update_bevy_audio_messages, update_gameplay_cues};
use crate::systems::camera::{camera_follow_system, new_camera};
use crate::systems::collision::collision_detector;
use crate::systems::enemy::{enemy_behavior_system, observe_enemy_animation_finished};
use crate::systems::gameplay::{
    YARN_COLOR, emit_audio, fall_detection_system, fall_recovery_system, player_actions_system,
    unlock_door,
};
use crate::systems::gamestate::{
    check_pending_state, ending_input, quit_on_back, state_is_ending, state_is_playing,
};
use crate::systems::life::NORMAL_TINT;
use crate::systems::physics::physics_system;
use crate::systems::platform::platform_selector_system;
use crate::systems::player::player_control_system;
use crate::systems::scheduler::run_scheduled_tasks;
use crate::systems::ttl::ttl_system;
use crate::systems::tween::{tween_alpha_system, tween_mapposition_system, tween_scale_system};

const FLOOR_TINT: u32 = 0x5d3954;
const STEP_TINT: u32 = 0x7b5ba0;
const KEY_TINT: u32 = 0xffd54f;
const TRAP_TINT: u32 = 0x76ff03;
const DOOR_TINT: u32 = 0x6d4c41;
const GHOST_TINT: u32 = 0xe0e0ff;

const KEY_SIZE: f32 = 24.0;
const KEY_FLOAT: f32 = 10.0;
const KEY_FLOAT_SECS: f32 = 1.0;
const YARN_SIZE: f32 = 20.0;
const TRAP_SIZE: (f32, f32) = (60.0, 12.0);
const DOOR_SIZE: (f32, f32) = (40.0, 54.0);
const GHOST_FRAME: f32 = 128.0;
const GHOST_SCALE: f32 = 0.8;
const GHOST_ALPHA: f32 = 0.8;

// ==================== RESOURCES ====================

/// Insert every resource the gameplay systems read, without a window.
///
/// `main` calls this before opening the audio thread; headless tests call it
/// on a bare [`World`].
pub fn insert_game_resources(world: &mut World, config: GameConfig, layout: LevelLayout) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(Gameplay::new(config.total_keys, config.max_throwables));
    world.insert_resource(Life::new(config.lives));
    world.insert_resource(Scheduler::new());
    world.insert_resource(PlatformSelector::default());
    world.insert_resource(HudMessage::default());
    world.insert_resource(CameraShake::default());
    world.insert_resource(AnimationStore::house());
    world.insert_resource(config);
    world.insert_resource(layout);
    world.init_resource::<Messages<GameplayCue>>();
    init_audio_messages(world);
}

/// Register the scene hooks and the observers, all marked [`Persistent`].
pub fn register_scene_systems(world: &mut World) {
    let mut systems_store = SystemsStore::new();

    // In bevy_ecs 0.18 registered systems are entities; keep them across
    // level rebuilds.
    let setup_id = world.register_system(setup);
    world.entity_mut(setup_id.entity()).insert(Persistent);
    systems_store.insert("setup", setup_id);

    let enter_play_id = world.register_system(enter_play);
    world.entity_mut(enter_play_id.entity()).insert(Persistent);
    systems_store.insert("enter_play", enter_play_id);

    let clean_level_id = world.register_system(clean_level);
    world.entity_mut(clean_level_id.entity()).insert(Persistent);
    systems_store.insert("clean_level", clean_level_id);

    let enter_ending_id = world.register_system(enter_ending);
    world.entity_mut(enter_ending_id.entity()).insert(Persistent);
    systems_store.insert("enter_ending", enter_ending_id);

    let quit_game_id = world.register_system(quit_game);
    world.entity_mut(quit_game_id.entity()).insert(Persistent);
    systems_store.insert("quit_game", quit_game_id);

    world.insert_resource(systems_store);

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.spawn((Observer::new(observe_collision), Persistent));
    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.spawn((Observer::new(observe_enemy_animation_finished), Persistent));
    world.flush();
}

/// Every per-frame system that runs without a window, in tick order.
///
/// `main` adds input sampling before, the audio bridge next to
/// [`update_bevy_audio_messages`] and rendering after.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            check_pending_state,
            update_bevy_audio_messages,
            run_scheduled_tasks,
            (
                player_control_system,
                platform_selector_system,
                tween_mapposition_system,
                tween_scale_system,
                tween_alpha_system,
                physics_system,
                ttl_system,
                enemy_behavior_system,
                collision_detector,
                player_actions_system,
                fall_detection_system,
                fall_recovery_system,
                quit_on_back,
            )
                .chain()
                .run_if(state_is_playing),
            ending_input.run_if(state_is_ending),
            animation,
            gameplay_cue_audio,
            update_gameplay_cues,
            camera_follow_system.run_if(resource_exists::<Camera2DRes>),
        )
            .chain(),
    );
    update
}

// ==================== SCENE HOOKS ====================

/// One-time setup: camera, sounds, then start playing.
pub fn setup(world: &mut World) {
    let (w, h) = world
        .get_resource::<GameConfig>()
        .map(|c| c.window_size())
        .unwrap_or((960, 540));
    world.insert_resource(Camera2DRes(new_camera(w as f32, h as f32)));

    emit_audio(
        world,
        AudioCmd::LoadMusic {
            id: MUSIC_AMBIENT.to_string(),
            path: "./assets/sounds/spooky.mp3".to_string(),
        },
    );
    let effects = [
        (FX_HURT, "./assets/sounds/angry-cat.mp3"),
        (FX_KEY, "./assets/sounds/collectkeys.mp3"),
        (FX_FALL, "./assets/sounds/falling.mp3"),
        (FX_WIN, "./assets/sounds/win.mp3"),
        (FX_CAT, "./assets/sounds/cat.mp3"),
    ];
    for (id, path) in effects {
        emit_audio(
            world,
            AudioCmd::LoadFx {
                id: id.to_string(),
                path: path.to_string(),
            },
        );
    }

    if let Some(mut next) = world.get_resource_mut::<NextGameState>() {
        next.set(GameStates::Playing);
    }
}

/// Build a fresh level: reset the per-level resources and spawn the house.
pub fn enter_play(world: &mut World) {
    let config = world.get_resource::<GameConfig>().cloned().unwrap_or_default();
    if !world.contains_resource::<LevelLayout>() {
        world.insert_resource(LevelLayout::house());
    }
    let layout = world.resource::<LevelLayout>().clone();

    let total_keys = config.total_keys.min(layout.keys.len() as u32);
    if total_keys != config.total_keys {
        warn!(
            "Level has {} keys, {} configured; using {}",
            layout.keys.len(),
            config.total_keys,
            total_keys
        );
    }

    world.insert_resource(Gameplay::new(total_keys, config.max_throwables));
    world.insert_resource(Life::new(config.lives));
    world.resource_mut::<Scheduler>().clear();
    world.insert_resource(PlatformSelector::default());
    world.insert_resource(HudMessage::default());
    world.insert_resource(CameraShake::default());

    spawn_level(world, &layout, &config);
    if total_keys == 0 {
        unlock_door(world);
    }

    emit_audio(
        world,
        AudioCmd::PlayMusic {
            id: MUSIC_AMBIENT.to_string(),
            looped: true,
        },
    );
    info!("Level started");
}

/// Despawn everything that is not [`Persistent`].
pub fn clean_level(mut commands: Commands, query: Query<Entity, Without<Persistent>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn enter_ending(mut audio: MessageWriter<AudioCmd>) {
    info!("The cat escaped the house");
    audio.write(AudioCmd::play_fx(FX_WIN));
    audio.write(AudioCmd::play_fx(FX_CAT));
}

pub fn quit_game() {
    info!("Quitting game");
}

// ==================== LEVEL BUILDER ====================

fn float_tween(pos: Vector2, dy: f32, seconds: f32) -> TweenPosition {
    TweenPosition::new(
        Vector2::new(pos.x, pos.y - dy),
        Vector2::new(pos.x, pos.y + dy),
        seconds,
    )
    .with_easing(Easing::SineInOut)
    .with_loop_mode(LoopMode::PingPong)
}

/// Spawn floors, steps, pickups, traps, ghosts, the door and the cat.
pub fn spawn_level(world: &mut World, layout: &LevelLayout, config: &GameConfig) {
    for spec in layout.segments() {
        let r = spec.rect;
        let mut entity = world.spawn((
            MapPosition::new(r.x, r.y),
            BoxCollider::new(r.width, r.height),
            Sprite::anchored(r.width, r.height),
            ZIndex(0),
        ));
        match spec.kind {
            SegmentKind::Floor(floor) => {
                entity.insert((FloorSegment { floor: Some(floor) }, Tint::rgb(FLOOR_TINT)));
            }
            SegmentKind::Step { sway, .. } => {
                entity.insert((FloorSegment { floor: None }, Tint::rgb(STEP_TINT)));
                if sway != 0.0 {
                    entity.insert(
                        TweenPosition::new(
                            Vector2::new(r.x, r.y),
                            Vector2::new(r.x + sway, r.y),
                            layout.step_sway_secs,
                        )
                        .with_easing(Easing::SineInOut)
                        .with_loop_mode(LoopMode::PingPong),
                    );
                }
            }
        }
    }

    for spot in layout.keys.iter() {
        let pos = layout.spot_position(spot);
        world.spawn((
            Collectible::key(),
            MapPosition::new(pos.x, pos.y),
            BoxCollider::centered(KEY_SIZE, KEY_SIZE),
            Sprite::centered(KEY_SIZE, KEY_SIZE),
            Scale::default(),
            Tint::rgb(KEY_TINT),
            ZIndex(2),
            float_tween(pos, KEY_FLOAT, KEY_FLOAT_SECS),
        ));
    }

    for spot in layout.yarns.iter() {
        let pos = layout.spot_position(spot);
        world.spawn((
            Collectible::yarn(),
            MapPosition::new(pos.x, pos.y),
            BoxCollider::centered(YARN_SIZE, YARN_SIZE),
            Sprite::centered(YARN_SIZE, YARN_SIZE),
            Scale::default(),
            Tint::rgb(YARN_COLOR),
            ZIndex(2),
        ));
    }

    for spot in layout.traps.iter() {
        let pos = layout.spot_position(spot);
        world.spawn((
            Hazard { damage: 1 },
            MapPosition::new(pos.x, pos.y),
            BoxCollider::centered(TRAP_SIZE.0, TRAP_SIZE.1),
            Sprite::centered(TRAP_SIZE.0, TRAP_SIZE.1),
            Tint::rgb(TRAP_TINT),
            ZIndex(1),
        ));
    }

    let mut ghosts = Vec::with_capacity(layout.ghosts.len());
    for spot in layout.ghosts.iter() {
        let pos = layout.spot_position(spot);
        let (min_x, max_x) = (pos.x - layout.ghost_patrol, pos.x + layout.ghost_patrol);
        let mut tint = Tint::rgb(GHOST_TINT);
        tint.set_opacity(GHOST_ALPHA);
        let body = GHOST_FRAME * GHOST_SCALE;
        let ghost = world
            .spawn((
                Enemy::patrolling(),
                MapPosition::new(pos.x, pos.y),
                BoxCollider::centered(body, body),
                Sprite::centered(GHOST_FRAME, GHOST_FRAME),
                Scale::uniform(GHOST_SCALE),
                tint,
                Animation::new(ANIM_GHOST_FLOAT),
                ZIndex(3),
                TweenPosition::new(
                    Vector2::new(min_x, pos.y),
                    Vector2::new(max_x, pos.y),
                    layout.ghost_patrol_secs,
                )
                .with_easing(Easing::SineInOut)
                .with_loop_mode(LoopMode::PingPong),
            ))
            .id();
        ghosts.push(ghost);
    }
    world.resource_mut::<Gameplay>().active_enemies = ghosts;

    let door = layout.spot_position(&layout.door);
    world.spawn((
        Door::default(),
        MapPosition::new(door.x, door.y),
        BoxCollider::centered(DOOR_SIZE.0, DOOR_SIZE.1),
        Sprite::centered(DOOR_SIZE.0, DOOR_SIZE.1),
        Tint::rgb(DOOR_TINT),
        ZIndex(1),
    ));

    spawn_player(world, layout.spot_position(&layout.player_spawn), config);
}

/// Spawn the cat standing, with its pivot at `pos`.
pub fn spawn_player(world: &mut World, pos: Vector2, config: &GameConfig) -> Entity {
    let profile = Posture::Standing.profile();
    world
        .spawn((
            Player::new(config.player_speed, config.jump_velocity),
            RigidBody::with_gravity(),
            MapPosition::new(pos.x, pos.y),
            Scale::uniform(profile.scale),
            profile.hitbox(),
            profile.sprite(false),
            Animation::new(profile.animation),
            Tint::rgb(NORMAL_TINT),
            ZIndex(4),
        ))
        .id()
}

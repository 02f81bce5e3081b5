//! Gameplay coordinator scenarios: pickups, the door, yarn, traps, ghosts,
//! game over, falls and level resets.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use wiskers::components::animation::Animation;
use wiskers::components::boxcollider::BoxCollider;
use wiskers::components::collectible::Collectible;
use wiskers::components::door::Door;
use wiskers::components::enemy::{ANIM_GHOST_FLOAT, ATTACK_RADIUS, Enemy, EnemyState};
use wiskers::components::hazard::Hazard;
use wiskers::components::mapposition::MapPosition;
use wiskers::components::platform::FloorSegment;
use wiskers::components::player::Player;
use wiskers::components::projectile::Projectile;
use wiskers::components::rigidbody::RigidBody;
use wiskers::components::sprite::Sprite;
use wiskers::components::tint::Tint;
use wiskers::components::tween::TweenAlpha;
use wiskers::events::audio::{AudioCmd, AudioMessage, FX_FALL, FX_HURT, MUSIC_AMBIENT};
use wiskers::events::gameplay::GameplayCue;
use wiskers::events::gamestate::GameStateChangedEvent;
use wiskers::game::{enter_play, insert_game_resources, register_scene_systems, spawn_player};
use wiskers::resources::gameconfig::GameConfig;
use wiskers::resources::gameplay::Gameplay;
use wiskers::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use wiskers::resources::hud::HudMessage;
use wiskers::resources::input::InputState;
use wiskers::resources::level::LevelLayout;
use wiskers::resources::life::Life;
use wiskers::resources::scheduler::{DeferredAction, Scheduler};
use wiskers::systems::animation::animation;
use wiskers::systems::audio::gameplay_cue_audio;
use wiskers::systems::enemy::{enemy_behavior_system, observe_enemy_animation_finished};
use wiskers::systems::gameplay::{
    MSG_DOOR_OPEN, MSG_NO_YARN, MSG_TRAP, collect_key, collect_throwable, fall_detection_system,
    fall_recovery_system, hit_enemy_contact, hit_enemy_with_projectile, hit_hazard, reset_level,
    throw_projectile, try_exit_level, unlock_door,
};
use wiskers::systems::gamestate::check_pending_state;
use wiskers::systems::scheduler::run_scheduled_tasks;
use wiskers::systems::time::update_world_time;

const DT: f32 = 1.0 / 60.0;

fn make_world() -> World {
    let mut world = World::new();
    insert_game_resources(&mut world, GameConfig::new(), LevelLayout::house());
    world
}

fn spawn_cat(world: &mut World) -> Entity {
    let player = spawn_player(world, Vector2::new(100.0, 900.0), &GameConfig::new());
    set_grounded(world, player);
    player
}

fn set_grounded(world: &mut World, player: Entity) {
    world.get_mut::<Player>(player).unwrap().grounded = true;
}

/// Advance the clock and run whatever became due.
fn advance(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    run_scheduled_tasks(world);
}

fn cues(world: &mut World) -> Vec<GameplayCue> {
    world
        .resource_mut::<Messages<GameplayCue>>()
        .drain()
        .collect()
}

fn audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    world.resource_mut::<Messages<AudioCmd>>().drain().collect()
}

fn tick_enemies(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(enemy_behavior_system);
    schedule.run(world);
}

/// One frame of ghost play: clock and deferred actions, then behaviour and
/// animation in frame order.
fn step_ghosts(world: &mut World) {
    advance(world, DT);
    let mut schedule = Schedule::default();
    schedule.add_systems((enemy_behavior_system, animation).chain());
    schedule.run(world);
    world.flush();
}

fn tick_cue_audio(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(gameplay_cue_audio);
    schedule.run(world);
}

fn tick_fall_recovery(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(fall_recovery_system);
    schedule.run(world);
}

fn tick_pending_state(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(check_pending_state);
    schedule.run(world);
}

fn count<F: bevy_ecs::query::QueryFilter>(world: &mut World) -> usize {
    let mut q = world.query_filtered::<Entity, F>();
    q.iter(world).count()
}

fn spawn_key(world: &mut World, x: f32) -> Entity {
    world
        .spawn((
            Collectible::key(),
            MapPosition::new(x, 900.0),
            BoxCollider::centered(24.0, 24.0),
        ))
        .id()
}

fn spawn_door(world: &mut World) -> Entity {
    world
        .spawn((
            Door::default(),
            MapPosition::new(1740.0, 173.0),
            Tint::rgb(0x6d4c41),
        ))
        .id()
}

fn spawn_trap(world: &mut World) -> Entity {
    world
        .spawn((
            Hazard { damage: 1 },
            MapPosition::new(100.0, 900.0),
            BoxCollider::centered(60.0, 12.0),
        ))
        .id()
}

fn spawn_ghost(world: &mut World, pos: Vector2) -> Entity {
    let ghost = world
        .spawn((
            Enemy::patrolling(),
            MapPosition::new(pos.x, pos.y),
            BoxCollider::centered(100.0, 100.0),
            Sprite::centered(128.0, 128.0),
            Animation::new(ANIM_GHOST_FLOAT),
        ))
        .id();
    world.resource_mut::<Gameplay>().active_enemies.push(ghost);
    ghost
}

// ==================== COLLECTIBLES ====================

#[test]
fn key_contact_is_counted_once() {
    let mut world = make_world();
    spawn_cat(&mut world);
    spawn_door(&mut world);
    let key = spawn_key(&mut world, 120.0);

    assert!(collect_key(&mut world, key));
    assert!(!collect_key(&mut world, key));
    assert!(!world.get::<BoxCollider>(key).unwrap().enabled);
    assert_eq!(world.resource::<Gameplay>().keys_collected, 0);

    advance(&mut world, 0.3);
    assert!(world.get_entity(key).is_err());
    assert_eq!(world.resource::<Gameplay>().keys_collected, 1);

    advance(&mut world, 0.3);
    assert_eq!(world.resource::<Gameplay>().keys_collected, 1);
    assert_eq!(
        cues(&mut world),
        vec![GameplayCue::KeyCollected {
            collected: 1,
            total: 3
        }]
    );
}

#[test]
fn door_unlocks_exactly_once() {
    let mut world = make_world();
    spawn_cat(&mut world);
    let door = spawn_door(&mut world);
    let keys: Vec<Entity> = (0..3).map(|i| spawn_key(&mut world, 100.0 * i as f32)).collect();

    for key in keys.iter() {
        collect_key(&mut world, *key);
    }
    advance(&mut world, 0.3);

    let gameplay = world.resource::<Gameplay>();
    assert_eq!(gameplay.keys_collected, 3);
    assert!(gameplay.door_open);
    assert!(!world.get::<Door>(door).unwrap().locked);
    assert!(world.get::<TweenAlpha>(door).is_some());
    assert_eq!(world.resource::<HudMessage>().text(), Some(MSG_DOOR_OPEN));

    let unlocks = cues(&mut world)
        .into_iter()
        .filter(|c| *c == GameplayCue::DoorUnlocked)
        .count();
    assert_eq!(unlocks, 1);

    // the message goes away on its own
    advance(&mut world, 2.0);
    assert_eq!(world.resource::<HudMessage>().text(), None);
    assert!(world.resource::<Gameplay>().door_open);
}

#[test]
fn yarn_is_capped() {
    let mut world = make_world();
    spawn_cat(&mut world);
    world.resource_mut::<Gameplay>().throwables = 6;
    let yarn = world
        .spawn((
            Collectible::yarn(),
            MapPosition::new(100.0, 900.0),
            BoxCollider::centered(20.0, 20.0),
        ))
        .id();

    assert!(collect_throwable(&mut world, yarn));
    advance(&mut world, 0.3);
    assert_eq!(world.resource::<Gameplay>().throwables, 6);
    assert!(world.get_entity(yarn).is_err());
}

// ==================== PROJECTILES ====================

#[test]
fn throwing_without_yarn_changes_nothing() {
    let mut world = make_world();
    spawn_cat(&mut world);

    assert!(throw_projectile(&mut world).is_none());
    assert_eq!(world.resource::<Gameplay>().throwables, 0);
    assert_eq!(count::<With<Projectile>>(&mut world), 0);
    assert_eq!(world.resource::<HudMessage>().text(), Some(MSG_NO_YARN));
    assert_eq!(cues(&mut world), vec![GameplayCue::ThrowableRejected]);

    advance(&mut world, 0.9);
    assert_eq!(world.resource::<HudMessage>().text(), None);
}

#[test]
fn yarn_defeats_ghost() {
    let mut world = make_world();
    spawn_cat(&mut world);
    world.resource_mut::<Gameplay>().throwables = 2;
    let ghost = spawn_ghost(&mut world, Vector2::new(600.0, 880.0));

    let projectile = throw_projectile(&mut world).unwrap();
    assert_eq!(world.resource::<Gameplay>().throwables, 1);
    let rb = world.get::<RigidBody>(projectile).unwrap();
    assert!(rb.velocity.x > 0.0);
    assert!(rb.velocity.y < 0.0);

    assert!(hit_enemy_with_projectile(&mut world, projectile, ghost));
    assert!(world.get_entity(projectile).is_err());
    assert!(world.resource::<Gameplay>().active_enemies.is_empty());

    // the ghost fades out first, matching nothing in the meantime
    assert!(!world.get::<Enemy>(ghost).unwrap().alive);
    assert!(!world.get::<BoxCollider>(ghost).unwrap().enabled);
    assert!(world.get::<TweenAlpha>(ghost).is_some());
    assert!(
        world
            .resource::<Scheduler>()
            .is_pending(DeferredAction::FinishDefeat(ghost))
    );
    let second = throw_projectile(&mut world).unwrap();
    assert!(!hit_enemy_with_projectile(&mut world, second, ghost));
    assert!(world.get_entity(second).is_ok());
    assert!(!hit_enemy_contact(&mut world, ghost));
    assert_eq!(world.resource::<Life>().health, 3);

    let defeats = cues(&mut world)
        .into_iter()
        .filter(|c| *c == GameplayCue::EnemyDefeated)
        .count();
    assert_eq!(defeats, 1);

    advance(&mut world, 0.5);
    assert!(world.get_entity(ghost).is_err());
}

// ==================== DAMAGE ====================

#[test]
fn trap_cooldown_and_invulnerability() {
    let mut world = make_world();
    let player = spawn_cat(&mut world);
    let trap = spawn_trap(&mut world);

    // t = 0
    assert!(hit_hazard(&mut world, trap));
    assert_eq!(world.resource::<Life>().health, 2);
    assert!(world.resource::<Life>().is_invulnerable());
    assert_eq!(world.resource::<HudMessage>().text(), Some(MSG_TRAP));

    // t = 0.5: cooldown still running
    advance(&mut world, 0.5);
    set_grounded(&mut world, player);
    assert!(!hit_hazard(&mut world, trap));
    assert_eq!(world.resource::<Life>().health, 2);

    // t = 1.2: both windows are over
    advance(&mut world, 0.7);
    set_grounded(&mut world, player);
    assert!(!world.resource::<Life>().is_invulnerable());
    assert!(hit_hazard(&mut world, trap));
    assert_eq!(world.resource::<Life>().health, 1);
}

#[test]
fn trap_and_ghost_on_the_same_frame_hurt_once() {
    let mut world = make_world();
    let player = spawn_cat(&mut world);
    let trap = spawn_trap(&mut world);
    let ghost = spawn_ghost(&mut world, Vector2::new(150.0, 880.0));

    assert!(hit_hazard(&mut world, trap));
    assert!(!hit_enemy_contact(&mut world, ghost));
    assert_eq!(world.resource::<Life>().health, 2);

    // the other way round, once both windows are over
    advance(&mut world, 1.2);
    set_grounded(&mut world, player);
    assert!(hit_enemy_contact(&mut world, ghost));
    set_grounded(&mut world, player);
    assert!(!hit_hazard(&mut world, trap));
    assert_eq!(world.resource::<Life>().health, 1);

    let hits = cues(&mut world)
        .into_iter()
        .filter(|c| *c == GameplayCue::DamageTaken)
        .count();
    assert_eq!(hits, 2);
}

#[test]
fn airborne_player_ignores_traps() {
    let mut world = make_world();
    let player = spawn_cat(&mut world);
    world.get_mut::<Player>(player).unwrap().grounded = false;
    let trap = world
        .spawn((Hazard { damage: 1 }, MapPosition::new(100.0, 900.0)))
        .id();
    assert!(!hit_hazard(&mut world, trap));
    assert_eq!(world.resource::<Life>().health, 3);
    assert!(!world.resource::<Gameplay>().hazard_cooldown);
}

#[test]
fn last_life_ends_the_game_and_restarts() {
    let mut world = make_world();
    world.insert_resource(Life::new(1));
    let player = spawn_cat(&mut world);
    let trap = world
        .spawn((Hazard { damage: 1 }, MapPosition::new(100.0, 900.0)))
        .id();

    assert!(hit_hazard(&mut world, trap));
    assert!(world.resource::<Life>().is_game_over());
    assert!(world.get::<RigidBody>(player).unwrap().frozen);
    assert_eq!(world.resource::<HudMessage>().text(), Some("GAME OVER"));
    assert!(cues(&mut world).contains(&GameplayCue::GameOver));
    assert!(audio_cmds(&mut world).contains(&AudioCmd::stop_music(MUSIC_AMBIENT)));

    // no damage after game over
    advance(&mut world, 1.0);
    set_grounded(&mut world, player);
    assert!(!hit_hazard(&mut world, trap));

    advance(&mut world, 1.1);
    assert_eq!(
        world.resource::<NextGameState>().get(),
        &NextGameStates::Pending(GameStates::Playing)
    );
}

#[test]
fn ghost_attacks_when_close() {
    let mut world = make_world();
    spawn_cat(&mut world);
    let ghost = spawn_ghost(&mut world, Vector2::new(150.0, 880.0));

    tick_enemies(&mut world);

    assert_eq!(world.get::<Enemy>(ghost).unwrap().state, EnemyState::Attacking);
    assert_eq!(world.resource::<Life>().health, 2);

    tick_cue_audio(&mut world);
    assert!(audio_cmds(&mut world).contains(&AudioCmd::play_fx(FX_HURT)));
    assert!(cues(&mut world).contains(&GameplayCue::DamageTaken));
}

#[test]
fn ghost_hits_once_per_attack() {
    let mut world = make_world();
    world.add_observer(observe_enemy_animation_finished);
    spawn_cat(&mut world);
    let ghost = spawn_ghost(&mut world, Vector2::new(150.0, 880.0));

    step_ghosts(&mut world);
    assert!(world.get::<Enemy>(ghost).unwrap().is_attacking());
    assert_eq!(world.resource::<Life>().health, 2);

    // the cat stays within reach for the whole attack
    let mut frames = 0;
    while world.get::<Enemy>(ghost).unwrap().is_attacking() {
        step_ghosts(&mut world);
        frames += 1;
        assert!(frames < 90, "attack animation never finished");
    }
    assert_eq!(world.get::<Enemy>(ghost).unwrap().state, EnemyState::Patrolling);
    assert!(world.get::<Animation>(ghost).unwrap().is(ANIM_GHOST_FLOAT));
    assert_eq!(world.resource::<Life>().health, 2);

    let hits = cues(&mut world)
        .into_iter()
        .filter(|c| *c == GameplayCue::DamageTaken)
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn ghost_at_the_edge_of_its_reach_holds_back() {
    let mut world = make_world();
    let player = spawn_cat(&mut world);
    let cat = world.get::<MapPosition>(player).unwrap().pos;
    let ghost = spawn_ghost(&mut world, Vector2::new(cat.x + ATTACK_RADIUS, cat.y));

    tick_enemies(&mut world);
    assert_eq!(world.get::<Enemy>(ghost).unwrap().state, EnemyState::Patrolling);
    assert_eq!(world.resource::<Life>().health, 3);

    world.get_mut::<MapPosition>(ghost).unwrap().pos.x -= 1.0;
    tick_enemies(&mut world);
    assert!(world.get::<Enemy>(ghost).unwrap().is_attacking());
    assert_eq!(world.resource::<Life>().health, 2);
}

#[test]
fn distant_ghost_keeps_patrolling() {
    let mut world = make_world();
    spawn_cat(&mut world);
    let ghost = spawn_ghost(&mut world, Vector2::new(800.0, 880.0));
    tick_enemies(&mut world);
    assert_eq!(world.get::<Enemy>(ghost).unwrap().state, EnemyState::Patrolling);
    assert_eq!(world.resource::<Life>().health, 3);
}

// ==================== DOOR & EXIT ====================

#[test]
fn only_an_unlocked_door_is_an_exit() {
    let mut world = make_world();
    let player = spawn_cat(&mut world);
    let door = spawn_door(&mut world);
    let at = world.get::<MapPosition>(door).unwrap().pos;
    world.get_mut::<MapPosition>(player).unwrap().pos = at;
    world.resource_mut::<InputState>().interact.press();

    // the counter alone does not open the door
    world.resource_mut::<Gameplay>().door_open = true;
    assert!(!try_exit_level(&mut world));
    assert_eq!(world.resource::<NextGameState>().get(), &NextGameStates::Unchanged);

    unlock_door(&mut world);
    assert!(try_exit_level(&mut world));
    assert_eq!(
        world.resource::<NextGameState>().get(),
        &NextGameStates::Pending(GameStates::Ending)
    );
    assert!(cues(&mut world).contains(&GameplayCue::LevelExit));
}

#[test]
fn keyless_level_starts_with_the_door_open() {
    let mut layout = LevelLayout::house();
    layout.keys.clear();
    let mut world = World::new();
    insert_game_resources(&mut world, GameConfig::new(), layout);

    enter_play(&mut world);

    let gameplay = world.resource::<Gameplay>();
    assert_eq!(gameplay.total_keys, 0);
    assert!(gameplay.door_open);
    let door = {
        let mut q = world.query_filtered::<Entity, With<Door>>();
        q.single(&world).unwrap()
    };
    assert!(!world.get::<Door>(door).unwrap().locked);
    assert!(cues(&mut world).contains(&GameplayCue::DoorUnlocked));
}

// ==================== FALLS & RESETS ====================

#[test]
fn fall_waits_for_the_sound_then_restarts() {
    let mut world = make_world();
    let player = spawn_cat(&mut world);
    let threshold = world.resource::<LevelLayout>().fall_threshold();
    world.get_mut::<MapPosition>(player).unwrap().pos.y = threshold + 1.0;

    fall_detection_system(&mut world);
    assert!(world.resource::<Gameplay>().falling);
    assert!(world.resource::<Life>().is_game_over());
    assert!(world.get::<RigidBody>(player).unwrap().frozen);
    assert!(cues(&mut world).contains(&GameplayCue::Fell));
    assert!(world.resource::<Scheduler>().is_pending(DeferredAction::RestartLevel));

    // only once
    fall_detection_system(&mut world);
    assert!(cues(&mut world).is_empty());

    world
        .resource_mut::<Messages<AudioMessage>>()
        .write(AudioMessage::FxFinished {
            id: FX_FALL.to_string(),
        });
    tick_fall_recovery(&mut world);
    assert_eq!(
        world.resource::<NextGameState>().get(),
        &NextGameStates::Pending(GameStates::Playing)
    );
}

#[test]
fn reset_rebuilds_a_fresh_level() {
    let mut world = make_world();
    register_scene_systems(&mut world);
    world.resource_mut::<NextGameState>().set(GameStates::Playing);
    world.trigger(GameStateChangedEvent {});
    world.flush();

    assert_eq!(world.resource::<GameState>().get(), &GameStates::Playing);
    let segments = count::<With<FloorSegment>>(&mut world);
    let pickups = count::<With<Collectible>>(&mut world);
    assert_eq!(segments, 26);
    assert_eq!(pickups, 7);
    assert_eq!(count::<With<Player>>(&mut world), 1);

    // make some progress, then start over
    let key = {
        let mut q = world.query::<(Entity, &Collectible)>();
        q.iter(&world)
            .find(|(_, c)| c.kind == wiskers::components::collectible::CollectibleKind::Key)
            .map(|(e, _)| e)
            .unwrap()
    };
    collect_key(&mut world, key);
    advance(&mut world, 0.3);
    world.resource_mut::<Life>().health = 1;
    assert_eq!(world.resource::<Gameplay>().keys_collected, 1);

    reset_level(&mut world);
    tick_pending_state(&mut world);
    world.flush();

    assert_eq!(count::<With<FloorSegment>>(&mut world), segments);
    assert_eq!(count::<With<Collectible>>(&mut world), pickups);
    assert_eq!(count::<With<Player>>(&mut world), 1);
    assert_eq!(world.resource::<Gameplay>().keys_collected, 0);
    assert_eq!(world.resource::<Gameplay>().active_enemies.len(), 2);
    assert_eq!(world.resource::<Life>().health, 3);
    assert_eq!(world.resource::<Scheduler>().pending(), 0);
    assert!(audio_cmds(&mut world).contains(&AudioCmd::PlayMusic {
        id: MUSIC_AMBIENT.to_string(),
        looped: true
    }));
}

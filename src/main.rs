//! Wiskers main entry point.
//!
//! A small haunted-house platformer written in Rust using:
//! - **raylib** for windowing, drawing and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! A cat climbs the five floors of the house, collects the three attic keys,
//! throws balls of yarn at ghosts and leaves through the attic door.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (player, floors, pickups, ghosts, tweens, etc.)
//! - [`events`] – Event and message types (collision, game state, cues, audio)
//! - [`game`] – Scene hooks, level builder and schedule wiring
//! - [`resources`] – ECS resources (gameplay state, life, scheduler, config, etc.)
//! - [`systems`] – ECS systems (player, platforms, physics, enemies, render, etc.)
//!
//! # Main Loop
//!
//! 1. Parse the command line, load `config.ini` and the level layout
//! 2. Open the raylib window and start the audio thread
//! 3. Register scene hooks and observers, enter the Setup state
//! 4. Run the schedule once per frame until Quitting or window close
//! 5. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --debug
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::audio::{setup_audio, shutdown_audio};
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::level::LevelLayout;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::camera::camera_follow_system;
use crate::systems::gamestate::check_pending_state;
use crate::systems::input::update_input_state;
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Wiskers, a cat in a haunted house
#[derive(Parser)]
#[command(version, about = "Climb the haunted house, find the keys, escape through the attic.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level layout to play instead of the built-in house (JSON).
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Start with the debug overlay enabled.
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Wiskers is waking up");
    // --------------- Configuration & level ---------------
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }

    let layout = match cli.level.as_ref() {
        Some(path) => LevelLayout::load_from_file(path).unwrap_or_else(|e| {
            log::error!("{}; falling back to the house", e);
            LevelLayout::house()
        }),
        None => LevelLayout::house(),
    };

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .title("Wiskers");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Esc is the in-game back action
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    game::insert_game_resources(&mut world, config, layout);
    if cli.debug {
        world.insert_resource(DebugMode {});
    }

    // Init audio; must go before the game setup
    setup_audio(&mut world);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    game::register_scene_systems(&mut world);

    // Enter Setup immediately
    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {});
    world.flush();

    let mut update = game::build_update_schedule();
    update.add_systems(update_input_state.before(check_pending_state));
    update.add_systems(
        // audio systems must be together
        (
            // First, advance AudioCmd messages and forward them to the audio thread
            update_bevy_audio_cmds,
            forward_audio_cmds,
            // Then, pull audio thread messages; they are advanced right after
            poll_audio_messages,
        )
            .chain()
            .after(check_pending_state)
            .before(update_bevy_audio_messages),
    );
    update.add_systems(render_system.after(camera_follow_system));

    if let Err(e) = update.initialize(&mut world) {
        log::error!("Failed to initialize schedule: {:?}", e);
        shutdown_audio(&mut world);
        return;
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !matches!(world.resource::<GameState>().get(), GameStates::Quitting)
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    shutdown_audio(&mut world);
    log::info!("Bye!");
}

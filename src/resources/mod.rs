//! ECS resources made available to systems.
//!
//! Long-lived data injected into the world: input, time, configuration,
//! level layout, the state owned by each gameplay component, and the bridges
//! to the audio thread and the renderer.
//!
//! Overview
//! - `animationstore` – frame counts and rates of every animation
//! - `audio` – bridge and channels for the background audio thread
//! - `camera2d` – shared 2D camera and screen shake
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – INI backed settings
//! - `gameplay` – counters and flags owned by the gameplay coordinator
//! - `gamestate` – authoritative and pending high-level game state
//! - `hud` – transient centre-screen message
//! - `input` – per-frame keyboard state
//! - `level` – house layout and derived floor geometry
//! - `life` – player health and invulnerability
//! - `platformselector` – the single active floor binding
//! - `scheduler` – deferred gameplay actions
//! - `systemsstore` – registry of systems callable by name
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod audio;
pub mod camera2d;
pub mod debugmode;
pub mod gameconfig;
pub mod gameplay;
pub mod gamestate;
pub mod hud;
pub mod input;
pub mod level;
pub mod life;
pub mod platformselector;
pub mod scheduler;
pub mod systemsstore;
pub mod worldtime;

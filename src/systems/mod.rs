//! Game systems.
//!
//! This module groups all ECS systems that advance simulation, input,
//! gameplay and rendering.
//!
//! Submodules overview
//! - [`animation`] – advance animations and report finished one-shots
//! - [`audio`] – audio thread, bridge pumps and the cue-to-sound mapping
//! - [`camera`] – follow the player inside the house, screen shake
//! - [`collision`] – overlap checks and event emission
//! - [`enemy`] – ghost patrol and attack
//! - [`gameplay`] – the gameplay coordinator operations (keys, yarn, traps, door, falls)
//! - [`gamestate`] – pending state transitions and scene input
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`life`] – damage, invulnerability and game over
//! - [`physics`] – gravity, integration and landing on the bound floor
//! - [`platform`] – choose the one floor segment the player can stand on
//! - [`player`] – player posture state machine and movement
//! - [`render`] – draw world, HUD and debug overlays using Raylib
//! - [`scheduler`] – fire deferred actions whose time has come
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn expired entities
//! - [`tween`] – animate position, scale and opacity over time

pub mod animation;
pub mod audio;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod gameplay;
pub mod gamestate;
pub mod input;
pub mod life;
pub mod physics;
pub mod platform;
pub mod player;
pub mod render;
pub mod scheduler;
pub mod time;
pub mod ttl;
pub mod tween;

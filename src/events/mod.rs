//! Event types and observers.
//!
//! Observer [`Event`](bevy_ecs::prelude::Event)s are one-shot notifications
//! handled immediately; [`Message`](bevy_ecs::message::Message)s are buffered
//! per frame and read by systems.
//!
//! Submodules:
//! - [`animation`] – a non-looping animation reached its last frame
//! - [`audio`] – commands and messages for the background audio thread
//! - [`collision`] – overlap notifications routed to the gameplay coordinator
//! - [`gameplay`] – change notifications for the HUD and audio layer
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`switchdebug`] – toggle the debug overlay
pub mod animation;
pub mod audio;
pub mod collision;
pub mod gameplay;
pub mod gamestate;
pub mod switchdebug;

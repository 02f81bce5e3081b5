//! Animation lifecycle events.
use bevy_ecs::prelude::*;

/// Fired once when a non-looping animation shows its last frame.
#[derive(Event, Debug, Clone)]
pub struct AnimationFinishedEvent {
    pub entity: Entity,
    pub animation_key: String,
}

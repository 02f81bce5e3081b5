//! Animation definition registry.
//!
//! Entities reference animations by key through the
//! [`Animation`](crate::components::animation::Animation) component; the
//! immutable timing data lives here.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::components::enemy::{ANIM_GHOST_ATTACK, ANIM_GHOST_FLOAT};
use crate::components::player::{ANIM_CROUCH, ANIM_IDLE, ANIM_JUMP, ANIM_WALK};

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// Timing of one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationResource {
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationStore {
    pub fn insert(&mut self, key: impl Into<String>, frame_count: usize, fps: f32, looped: bool) {
        self.animations.insert(
            key.into(),
            AnimationResource {
                frame_count,
                fps,
                looped,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    /// Animations used by the cat and the ghosts.
    pub fn house() -> Self {
        let mut store = Self::default();
        store.insert(ANIM_IDLE, 4, 6.0, true);
        store.insert(ANIM_WALK, 8, 12.0, true);
        store.insert(ANIM_JUMP, 1, 1.0, true);
        store.insert(ANIM_CROUCH, 1, 1.0, true);
        store.insert(ANIM_GHOST_FLOAT, 25, 12.0, true);
        store.insert(ANIM_GHOST_ATTACK, 8, 12.0, false);
        store
    }

    /// Playback length of one run through the animation, in seconds.
    pub fn duration(&self, key: &str) -> Option<f32> {
        self.get(key)
            .map(|a| a.frame_count as f32 / a.fps.max(f32::EPSILON))
    }
}

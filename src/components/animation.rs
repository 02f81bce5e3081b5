use bevy_ecs::prelude::Component;

/// Playback state of the animation currently shown by an entity.
///
/// Definitions (frame count, fps, looping) live in the
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
/// `finished` is set once a non-looped animation reaches its last frame, so
/// the completion event is emitted exactly once per playback.
#[derive(Debug, Clone, Component)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
    pub finished: bool,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
            finished: false,
        }
    }

    /// Switch to `key`, restarting playback. No-op if `key` is already playing.
    pub fn play(&mut self, key: &str) {
        if self.animation_key != key {
            self.restart(key);
        }
    }

    /// Start `key` from its first frame even if it is already playing.
    pub fn restart(&mut self, key: &str) {
        self.animation_key = key.to_string();
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        self.finished = false;
    }

    pub fn is(&self, key: &str) -> bool {
        self.animation_key == key
    }
}

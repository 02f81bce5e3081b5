//! Shared 2D camera resources.
//!
//! [`Camera2DRes`] wraps raylib's [`Camera2D`] so the follow system and the
//! renderer agree on one world/screen transform. [`CameraShake`] holds the
//! short screen shake started when the player gets hurt.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Camera2D;

#[derive(Resource)]
pub struct Camera2DRes(pub Camera2D);

/// Remaining shake time and its strength as a fraction of the screen size.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraShake {
    pub remaining: f32,
    pub intensity: f32,
}

impl CameraShake {
    pub fn start(&mut self, seconds: f32, intensity: f32) {
        self.remaining = seconds;
        self.intensity = intensity;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

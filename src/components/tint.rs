//! Colour tint component.
//!
//! The [`Tint`] colour fills the entity's frame when rendering. Gameplay
//! feedback writes to it: red while the player is invulnerable, black on
//! game over, gold once the attic door is unlocked. Alpha tweens write only
//! the alpha channel.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Component, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    /// Create a new Tint with the specified RGBA values.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Color::new(r, g, b, a),
        }
    }

    /// Opaque tint from a `0xRRGGBB` literal.
    pub fn rgb(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
            255,
        )
    }

    /// Replace the RGB channels, keeping the current alpha.
    pub fn set_rgb(&mut self, hex: u32) {
        let a = self.color.a;
        self.color = Self::rgb(hex).color;
        self.color.a = a;
    }

    /// Set alpha from a 0.0..=1.0 opacity.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.color.a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    }

    pub fn opacity(&self) -> f32 {
        self.color.a as f32 / 255.0
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}

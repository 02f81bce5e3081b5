use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Visual frame of an entity in unscaled pixels.
///
/// `origin` is the pivot inside the frame (also unscaled); the renderer
/// multiplies both by the entity's [`Scale`](super::scale::Scale). Actors use
/// the frame centre, floor segments the top-left corner.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub width: f32,
    pub height: f32,
    pub origin: Vector2,
    pub flip_h: bool,
}

impl Sprite {
    /// Frame pivoted on its centre.
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            origin: Vector2 {
                x: width * 0.5,
                y: height * 0.5,
            },
            flip_h: false,
        }
    }

    /// Frame pivoted on its top-left corner.
    pub fn anchored(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            origin: Vector2::zero(),
            flip_h: false,
        }
    }

    /// Frame pivoted on its bottom-centre.
    pub fn resting(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            origin: Vector2 {
                x: width * 0.5,
                y: height,
            },
            flip_h: false,
        }
    }
}

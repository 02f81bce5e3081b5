use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// World-space pivot of an entity.
///
/// Actors (player, enemies, pickups, projectiles) use the centre of their
/// visual frame as pivot. Floor segments use their top-left corner.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Euclidean distance to another pivot.
    pub fn distance_to(&self, other: &MapPosition) -> f32 {
        let dx = self.pos.x - other.pos.x;
        let dy = self.pos.y - other.pos.y;
        (dx * dx + dy * dy).sqrt()
    }
}

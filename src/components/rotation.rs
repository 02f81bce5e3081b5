use bevy_ecs::prelude::Component;

/// Visual spin in degrees, advanced by the physics step from angular velocity.
#[derive(Component, Clone, Debug, Copy, Default)]
pub struct Rotation {
    pub degrees: f32,
}

use bevy_ecs::prelude::Component;

/// Environmental trap (ectoplasm puddle) that hurts grounded players.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    pub damage: u32,
}

impl Default for Hazard {
    fn default() -> Self {
        Self { damage: 1 }
    }
}

use bevy_ecs::prelude::Component;

/// Attic door. Stays locked until every key has been collected; once
/// unlocked it never locks again and becomes the level exit.
#[derive(Component, Debug, Clone, Copy)]
pub struct Door {
    pub locked: bool,
}

impl Default for Door {
    fn default() -> Self {
        Self { locked: true }
    }
}

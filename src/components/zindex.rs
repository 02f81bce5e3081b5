use bevy_ecs::prelude::Component;

/// Draw order; lower values are drawn first.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

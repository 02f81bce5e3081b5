//! Pickups lying around the house.

use bevy_ecs::prelude::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Attic key, counted towards unlocking the door.
    Key,
    /// Ball of yarn, adds one throwable.
    Yarn,
}

/// Lifecycle of a pickup: `Live` until first touched, then `Consuming` while
/// the feedback animation plays. Destroyed collectibles are despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeState {
    Live,
    Consuming,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub state: ConsumeState,
}

impl Collectible {
    pub fn key() -> Self {
        Self {
            kind: CollectibleKind::Key,
            state: ConsumeState::Live,
        }
    }

    pub fn yarn() -> Self {
        Self {
            kind: CollectibleKind::Yarn,
            state: ConsumeState::Live,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state == ConsumeState::Live
    }
}

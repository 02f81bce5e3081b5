//! Change notifications published by the gameplay components.
//!
//! The HUD and the audio layer consume these; nothing in the core depends on
//! who listens.

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameplayCue {
    KeyCollected { collected: u32, total: u32 },
    ThrowableChanged { count: u32 },
    /// Throw pressed with nothing to throw.
    ThrowableRejected,
    ProjectileThrown,
    HealthChanged { health: u32 },
    DamageTaken,
    EnemyDefeated,
    DoorUnlocked,
    LevelExit,
    GameOver,
    /// The player dropped below the house.
    Fell,
}

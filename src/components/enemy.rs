//! Hostile ghost state.

use bevy_ecs::prelude::Component;

pub const ANIM_GHOST_FLOAT: &str = "ghost_float";
pub const ANIM_GHOST_ATTACK: &str = "ghost_attack";

/// Distance from the ghost's pivot at which it lunges at the player.
pub const ATTACK_RADIUS: f32 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyState {
    #[default]
    Patrolling,
    Attacking,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub state: EnemyState,
    pub attack_radius: f32,
    /// Cleared the moment a projectile lands; a dead ghost is never matched again.
    pub alive: bool,
}

impl Enemy {
    /// A live ghost. Its patrol span is carried by its `TweenPosition`.
    pub fn patrolling() -> Self {
        Self {
            state: EnemyState::Patrolling,
            attack_radius: ATTACK_RADIUS,
            alive: true,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.state == EnemyState::Attacking
    }
}

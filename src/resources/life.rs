//! Player health and invulnerability.
//!
//! [`Life`] is the state half of the damage manager; the side effects (tint,
//! scheduling, game over sequence) live in `crate::systems::life`.

use bevy_ecs::prelude::*;

/// Seconds of invulnerability after a hit.
pub const INVULNERABILITY_SECS: f32 = 1.0;
/// Seconds between game over and the automatic restart.
pub const GAME_OVER_RESTART_SECS: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Normal,
    Invulnerable,
    /// Terminal until the level is rebuilt.
    GameOver,
}

/// Result of [`Life::apply_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable or already dead; nothing changed.
    Ignored,
    /// Health went down and the invulnerability window started.
    Hurt,
    /// Health reached zero.
    Fatal,
}

#[derive(Resource, Debug, Clone)]
pub struct Life {
    pub health: u32,
    pub max_health: u32,
    pub state: LifeState,
}

impl Default for Life {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Life {
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            state: LifeState::Normal,
        }
    }

    pub fn can_take_damage(&self) -> bool {
        self.state == LifeState::Normal
    }

    pub fn is_game_over(&self) -> bool {
        self.state == LifeState::GameOver
    }

    pub fn is_invulnerable(&self) -> bool {
        self.state == LifeState::Invulnerable
    }

    /// Subtract `amount` from health unless damage is currently blocked.
    ///
    /// Health saturates at zero. A non-fatal hit moves to
    /// [`LifeState::Invulnerable`]; the caller owns ending that window.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.can_take_damage() {
            return DamageOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.state = LifeState::GameOver;
            DamageOutcome::Fatal
        } else {
            self.state = LifeState::Invulnerable;
            DamageOutcome::Hurt
        }
    }

    /// Close the invulnerability window. Returns false if there was none.
    pub fn end_invulnerability(&mut self) -> bool {
        if self.state == LifeState::Invulnerable {
            self.state = LifeState::Normal;
            true
        } else {
            false
        }
    }

    /// Force the terminal state, e.g. after a fall.
    pub fn kill(&mut self) {
        self.state = LifeState::GameOver;
    }
}

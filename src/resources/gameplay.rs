//! Counters and flags owned by the gameplay coordinator.
//!
//! Only the operations in `crate::systems::gameplay` mutate this resource;
//! the HUD and the render pass read it.

use bevy_ecs::prelude::*;

/// Seconds before an environmental trap may hurt again.
pub const HAZARD_COOLDOWN_SECS: f32 = 0.9;

#[derive(Resource, Debug, Clone)]
pub struct Gameplay {
    pub keys_collected: u32,
    pub total_keys: u32,
    pub throwables: u32,
    pub max_throwables: u32,
    /// Monotonic within a level: once true it stays true until rebuild.
    pub door_open: bool,
    /// Enemies that can still be matched by proximity or collision.
    pub active_enemies: Vec<Entity>,
    /// Set while the trap re-trigger cooldown runs.
    pub hazard_cooldown: bool,
    /// Set once the player fell out of the house.
    pub falling: bool,
}

impl Default for Gameplay {
    fn default() -> Self {
        Self::new(3, 6)
    }
}

impl Gameplay {
    /// A level without keys starts with the door already open.
    pub fn new(total_keys: u32, max_throwables: u32) -> Self {
        Self {
            keys_collected: 0,
            total_keys,
            throwables: 0,
            max_throwables,
            door_open: total_keys == 0,
            active_enemies: Vec::new(),
            hazard_cooldown: false,
            falling: false,
        }
    }

    /// Count one key. Returns true when this key unlocks the door.
    pub fn add_key(&mut self) -> bool {
        self.keys_collected = (self.keys_collected + 1).min(self.total_keys);
        if !self.door_open && self.keys_collected >= self.total_keys {
            self.door_open = true;
            return true;
        }
        false
    }

    /// Count one throwable, saturating at the maximum.
    pub fn add_throwable(&mut self) {
        self.throwables = (self.throwables + 1).min(self.max_throwables);
    }

    /// Spend one throwable. Returns false when none are left.
    pub fn take_throwable(&mut self) -> bool {
        if self.throwables == 0 {
            return false;
        }
        self.throwables -= 1;
        true
    }

    /// Forget `enemy`. Returns false if it was already inactive.
    pub fn remove_enemy(&mut self, enemy: Entity) -> bool {
        match self.active_enemies.iter().position(|e| *e == enemy) {
            Some(index) => {
                self.active_enemies.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_enemy_active(&self, enemy: Entity) -> bool {
        self.active_enemies.contains(&enemy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keys_means_open_door() {
        let mut gameplay = Gameplay::new(0, 6);
        assert!(gameplay.door_open);
        assert!(!gameplay.add_key());
        assert_eq!(gameplay.keys_collected, 0);
    }

    #[test]
    fn test_door_unlocks_once() {
        let mut gameplay = Gameplay::new(2, 6);
        assert!(!gameplay.add_key());
        assert!(gameplay.add_key());
        assert!(gameplay.door_open);
        assert!(!gameplay.add_key());
        assert!(gameplay.door_open);
        assert_eq!(gameplay.keys_collected, 2);
    }

    #[test]
    fn test_zero_keys_never_unlocks_by_itself() {
        let gameplay = Gameplay::new(0, 6);
        assert!(!gameplay.door_open);
    }

    #[test]
    fn test_throwables_clamped() {
        let mut gameplay = Gameplay::new(3, 2);
        assert!(!gameplay.take_throwable());
        gameplay.add_throwable();
        gameplay.add_throwable();
        gameplay.add_throwable();
        assert_eq!(gameplay.throwables, 2);
        assert!(gameplay.take_throwable());
        assert_eq!(gameplay.throwables, 1);
    }

    #[test]
    fn test_remove_enemy_once() {
        let mut world = World::new();
        let ghost = world.spawn_empty().id();
        let mut gameplay = Gameplay::default();
        gameplay.active_enemies.push(ghost);
        assert!(gameplay.is_enemy_active(ghost));
        assert!(gameplay.remove_enemy(ghost));
        assert!(!gameplay.remove_enemy(ghost));
        assert!(!gameplay.is_enemy_active(ghost));
    }
}

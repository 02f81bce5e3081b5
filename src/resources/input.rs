//! Per-frame keyboard input resource.
//!
//! Captures the actions the game reacts to and exposes them to systems via
//! the [`InputState`] resource. Every action has a primary binding (arrow
//! keys, as in the original layout) and an optional alternative (WASD).
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with its keyboard bindings.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
    /// Optional second key for the same action.
    pub alt_binding: Option<KeyboardKey>,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL, None)
    }
}

impl BoolState {
    pub fn bound(key_binding: KeyboardKey, alt_binding: Option<KeyboardKey>) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
            alt_binding,
        }
    }

    /// Mark the key as pressed on this frame.
    pub fn press(&mut self) {
        self.just_pressed = !self.active;
        self.active = true;
        self.just_released = false;
    }

    /// Mark the key as released on this frame.
    pub fn release(&mut self) {
        self.just_released = self.active;
        self.active = false;
        self.just_pressed = false;
    }

    /// Drop the edge flags, keeping the held state.
    pub fn settle(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub jump: BoolState,
    pub crouch: BoolState,
    pub interact: BoolState,
    pub throw: BoolState,
    pub action_back: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_left: BoolState::bound(KeyboardKey::KEY_LEFT, Some(KeyboardKey::KEY_A)),
            move_right: BoolState::bound(KeyboardKey::KEY_RIGHT, Some(KeyboardKey::KEY_D)),
            jump: BoolState::bound(KeyboardKey::KEY_UP, Some(KeyboardKey::KEY_SPACE)),
            crouch: BoolState::bound(KeyboardKey::KEY_DOWN, Some(KeyboardKey::KEY_S)),
            interact: BoolState::bound(KeyboardKey::KEY_E, None),
            throw: BoolState::bound(KeyboardKey::KEY_X, None),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE, None),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11, None),
        }
    }
}

impl InputState {
    /// Horizontal intent: -1, 0 or +1. Opposite keys cancel out.
    pub fn horizontal_axis(&self) -> f32 {
        match (self.move_left.active, self.move_right.active) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn has_horizontal_intent(&self) -> bool {
        self.move_left.active || self.move_right.active
    }

    /// Clear every edge flag. Used when input is driven by hand (tests, replays).
    pub fn settle(&mut self) {
        for state in [
            &mut self.move_left,
            &mut self.move_right,
            &mut self.jump,
            &mut self.crouch,
            &mut self.interact,
            &mut self.throw,
            &mut self.action_back,
            &mut self.mode_debug,
        ] {
            state.settle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_edge_once() {
        let mut s = BoolState::default();
        s.press();
        assert!(s.active && s.just_pressed);
        s.press();
        assert!(s.active && !s.just_pressed);
        s.release();
        assert!(!s.active && s.just_released);
    }

    #[test]
    fn test_horizontal_axis() {
        let mut input = InputState::default();
        assert_eq!(input.horizontal_axis(), 0.0);
        input.move_left.press();
        assert_eq!(input.horizontal_axis(), -1.0);
        input.move_right.press();
        assert_eq!(input.horizontal_axis(), 0.0);
        assert!(input.has_horizontal_intent());
    }

    #[test]
    fn test_settle_keeps_held_keys() {
        let mut input = InputState::default();
        input.jump.press();
        input.settle();
        assert!(input.jump.active);
        assert!(!input.jump.just_pressed);
    }
}

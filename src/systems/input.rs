//! Input system.
//!
//! [`update_input_state`] polls raylib once per frame and writes the result
//! into [`InputState`]. F11 additionally triggers a [`SwitchDebugEvent`].
use bevy_ecs::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{BoolState, InputState};

fn poll(state: &mut BoolState, rl: &raylib::RaylibHandle) {
    let keys = std::iter::once(state.key_binding).chain(state.alt_binding);
    let (mut down, mut pressed, mut released) = (false, false, false);
    for key in keys {
        down |= rl.is_key_down(key);
        pressed |= rl.is_key_pressed(key);
        released |= rl.is_key_released(key);
    }
    state.active = down;
    state.just_pressed = pressed;
    state.just_released = released && !down;
}

/// Poll raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let input = &mut *input;
    for state in [
        &mut input.move_left,
        &mut input.move_right,
        &mut input.jump,
        &mut input.crouch,
        &mut input.interact,
        &mut input.throw,
        &mut input.action_back,
        &mut input.mode_debug,
    ] {
        poll(state, &rl);
    }

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}

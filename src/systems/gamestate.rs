use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::InputState;
use bevy_ecs::prelude::*;
use log::info;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    // Check if there is a pending state change
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

pub fn state_is_ending(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Ending)
}

/// Esc while playing leaves the game.
pub fn quit_on_back(input: Res<InputState>, mut next_state: ResMut<NextGameState>) {
    if input.action_back.just_pressed {
        info!("Back pressed, quitting");
        next_state.set(GameStates::Quitting);
    }
}

/// On the ending screen, interact or back starts the house again.
pub fn ending_input(input: Res<InputState>, mut next_state: ResMut<NextGameState>) {
    if input.interact.just_pressed || input.action_back.just_pressed {
        next_state.set(GameStates::Playing);
    }
}

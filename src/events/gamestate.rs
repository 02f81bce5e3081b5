//! Game state transition event and observer.
//!
//! Systems request a change by updating [`NextGameState`];
//! `check_pending_state` then triggers a [`GameStateChangedEvent`], and the
//! observer here applies it to [`GameState`] and runs the exit/enter systems
//! stored in [`SystemsStore`].
//!
//! Re-entering the current state is allowed and runs both hooks: this is how
//! `Playing -> Playing` rebuilds the level from scratch.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Apply the pending transition stored in [`NextGameState`], if any.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Copies the pending value into [`GameState`], queues the exit hook of the
/// old state then the enter hook of the new one, and clears the request.
/// Hooks are looked up by name (`"setup"`, `"enter_play"`, ...).
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    else {
        warn!(
            "Game state resources missing. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
        return;
    };

    match next_game_state.get().clone() {
        Pending(new_state) => {
            let old_state = game_state.get().clone();
            info!("Transitioning from {:?} to {:?}", old_state, new_state);
            game_state.set(new_state.clone());
            next_game_state.reset();
            on_state_exit(&old_state, &mut commands, &systems_store);
            on_state_enter(&new_state, &mut commands, &systems_store);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

fn run_hook(name: &str, commands: &mut Commands, systems_store: &SystemsStore) {
    match systems_store.get(name) {
        Some(id) => commands.run_system(*id),
        None => warn!("System '{}' not found in SystemsStore", name),
    }
}

fn on_state_enter(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::None => debug!("Entered None state"),
        GameStates::Setup => run_hook("setup", commands, systems_store),
        GameStates::Playing => run_hook("enter_play", commands, systems_store),
        GameStates::Ending => run_hook("enter_ending", commands, systems_store),
        GameStates::Quitting => run_hook("quit_game", commands, systems_store),
    }
}

fn on_state_exit(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::Playing | GameStates::Ending => {
            run_hook("clean_level", commands, systems_store)
        }
        other => debug!("Exited {:?} state", other),
    }
}

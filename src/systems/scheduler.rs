//! Dispatch of deferred gameplay actions.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::hud::HudMessage;
use crate::resources::scheduler::{DeferredAction, Scheduler};
use crate::resources::worldtime::WorldTime;
use crate::systems::gameplay::{end_hazard_cooldown, finish_consume, finish_defeat, reset_level};
use crate::systems::life::end_invulnerability;

/// Run every action whose due time has passed, in order.
pub fn run_scheduled_tasks(world: &mut World) {
    let Some(now) = world.get_resource::<WorldTime>().map(|t| t.elapsed) else {
        return;
    };
    let due = match world.get_resource_mut::<Scheduler>() {
        Some(mut scheduler) => scheduler.take_due(now),
        None => return,
    };

    for action in due {
        debug!("Running deferred {:?} at {:.3}", action, now);
        match action {
            DeferredAction::ClearMessage { token } => {
                if let Some(mut hud) = world.get_resource_mut::<HudMessage>() {
                    hud.clear(token);
                }
            }
            DeferredAction::EndInvulnerability => end_invulnerability(world),
            DeferredAction::EndHazardCooldown => end_hazard_cooldown(world),
            DeferredAction::FinishConsume(entity) => finish_consume(world, entity),
            DeferredAction::FinishDefeat(entity) => finish_defeat(world, entity),
            DeferredAction::RestartLevel => reset_level(world),
        }
    }
}

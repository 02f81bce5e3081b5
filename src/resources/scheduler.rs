//! Deferred gameplay actions.
//!
//! Every timed effect in the game (message expiry, end of invulnerability,
//! hazard cooldown, collectible and ghost removal, restart) is queued here
//! against [`WorldTime::elapsed`](crate::resources::worldtime::WorldTime) and
//! dispatched by `crate::systems::scheduler::run_scheduled_tasks`.
//!
//! Actions due on the same frame run in due-time order, ties broken by the
//! order they were scheduled in.

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

/// Slack used when comparing due times against the clock.
const DUE_EPSILON: f32 = 1e-4;

/// An action to perform once its delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Hide the HUD message if it is still the one identified by `token`.
    ClearMessage { token: u64 },
    EndInvulnerability,
    EndHazardCooldown,
    /// Remove a consumed collectible and count it.
    FinishConsume(Entity),
    /// Remove a defeated ghost once its fade has played out.
    FinishDefeat(Entity),
    RestartLevel,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    due: f32,
    seq: u64,
    action: DeferredAction,
}

/// Queue of pending [`DeferredAction`]s.
#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run `delay` seconds after `now`.
    pub fn schedule(&mut self, now: f32, delay: f32, action: DeferredAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            due: now + delay.max(0.0),
            seq,
            action,
        });
    }

    /// Remove and return every action due at `now`, in dispatch order.
    pub fn take_due(&mut self, now: f32) -> SmallVec<[DeferredAction; 4]> {
        let mut due: SmallVec<[ScheduledTask; 4]> = SmallVec::new();
        self.tasks.retain(|task| {
            if task.due <= now + DUE_EPSILON {
                due.push(*task);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|task| task.action).collect()
    }

    /// Drop every pending action. Called when a level is torn down.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_pending(&self, action: DeferredAction) -> bool {
        self.tasks.iter().any(|task| task.action == action)
    }
}

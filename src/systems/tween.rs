//! Tween animation systems.
//!
//! - [`tween_mapposition_system`] – ghost patrols, swaying steps, floating
//!   keys and the pickup lift
//! - [`tween_scale_system`] – the pickup pop
//! - [`tween_alpha_system`] – the door blink
//!
//! All three share [`advance_clock`] and [`ease`].

use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::tint::Tint;
use crate::components::tween::{Easing, LoopMode, TweenAlpha, TweenClock, TweenPosition, TweenScale};
use crate::resources::worldtime::WorldTime;
use bevy_ecs::prelude::*;
use raylib::math::Vector2;
use std::f32::consts::PI;

/// Apply an easing curve to `t`, clamped to [0, 1].
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::SineInOut => -((PI * t).cos() - 1.0) * 0.5,
    }
}

pub(crate) fn lerp_v2(a: Vector2, b: Vector2, t: f32) -> Vector2 {
    Vector2 {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move the clock by `dt` and resolve the loop mode at either end.
///
/// Returns the eased progress in [0, 1] after the step.
pub(crate) fn advance_clock(clock: &mut TweenClock, dt: f32) -> f32 {
    if clock.duration <= 0.0 {
        clock.playing = false;
        clock.time = 0.0;
        return if clock.loop_mode == LoopMode::Yoyo { 0.0 } else { 1.0 };
    }

    let dir = if clock.forward { 1.0 } else { -1.0 };
    clock.time += dt * dir;

    let finished_forward = clock.forward && clock.time >= clock.duration;
    let finished_backward = !clock.forward && clock.time <= 0.0;

    if finished_forward || finished_backward {
        match clock.loop_mode {
            LoopMode::Once => {
                clock.playing = false;
                clock.time = clock.time.clamp(0.0, clock.duration);
            }
            LoopMode::Loop => {
                clock.time = if finished_forward { 0.0 } else { clock.duration };
            }
            LoopMode::PingPong => {
                clock.forward = !clock.forward;
                clock.time = clock.time.clamp(0.0, clock.duration);
            }
            LoopMode::Yoyo => {
                if finished_forward && !clock.returned {
                    clock.forward = false;
                    clock.returned = true;
                    clock.time = clock.duration;
                } else {
                    clock.playing = false;
                    clock.time = 0.0;
                }
            }
        }
    }
    ease(clock.easing, clock.time / clock.duration)
}

pub fn tween_mapposition_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut MapPosition, &mut TweenPosition)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut mp, mut tw) in query.iter_mut() {
        if !tw.clock.playing {
            continue;
        }
        let t = advance_clock(&mut tw.clock, dt);
        mp.pos = lerp_v2(tw.from, tw.to, t);
    }
}

pub fn tween_scale_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut Scale, &mut TweenScale)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut scale, mut tw) in query.iter_mut() {
        if !tw.clock.playing {
            continue;
        }
        let t = advance_clock(&mut tw.clock, dt);
        scale.scale = lerp_v2(tw.from, tw.to, t);
    }
}

pub fn tween_alpha_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut Tint, &mut TweenAlpha)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut tint, mut tw) in query.iter_mut() {
        if !tw.clock.playing {
            continue;
        }
        let t = advance_clock(&mut tw.clock, dt);
        tint.set_opacity(lerp_f32(tw.from, tw.to, t));
    }
}

//! Tween components for animated interpolation.
//!
//! - [`TweenPosition`] – animate [`MapPosition`](super::mapposition::MapPosition)
//!   (ghost patrol, swaying steps, floating keys, pickup lift)
//! - [`TweenScale`] – animate [`Scale`](super::scale::Scale) (pickup pop)
//! - [`TweenAlpha`] – animate the alpha of [`Tint`](super::tint::Tint) (door blink)
//!
//! See [`crate::systems::tween`] for the update systems.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Determines how a tween behaves when it reaches the end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopMode {
    /// Play once and stop at `to`.
    Once,
    /// Restart from the beginning when finished.
    Loop,
    /// Reverse direction when reaching either end, forever.
    PingPong,
    /// Go to `to`, come back to `from`, then stop.
    Yoyo,
}

/// Easing functions for smooth interpolation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    SineInOut,
}

/// Shared playback cursor used by every tween kind.
#[derive(Clone, Copy, Debug)]
pub struct TweenClock {
    /// Duration of one leg in seconds.
    pub duration: f32,
    pub easing: Easing,
    pub loop_mode: LoopMode,
    pub playing: bool,
    /// Current time within the leg.
    pub time: f32,
    /// Direction of playback (true = towards `to`).
    pub forward: bool,
    /// Set once a Yoyo tween has turned around.
    pub returned: bool,
}

impl TweenClock {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            easing: Easing::Linear,
            loop_mode: LoopMode::Once,
            playing: true,
            time: 0.0,
            forward: true,
            returned: false,
        }
    }
}

/// Animates an entity's [`MapPosition`](super::mapposition::MapPosition) between two points.
#[derive(Component, Clone, Debug)]
pub struct TweenPosition {
    pub from: Vector2,
    pub to: Vector2,
    pub clock: TweenClock,
}

impl TweenPosition {
    pub fn new(from: Vector2, to: Vector2, duration: f32) -> Self {
        TweenPosition {
            from,
            to,
            clock: TweenClock::new(duration),
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.clock.easing = easing;
        self
    }
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.clock.loop_mode = loop_mode;
        self
    }
}

/// Animates an entity's [`Scale`](super::scale::Scale) between two values.
#[derive(Component, Clone, Debug)]
pub struct TweenScale {
    pub from: Vector2,
    pub to: Vector2,
    pub clock: TweenClock,
}

impl TweenScale {
    pub fn new(from: Vector2, to: Vector2, duration: f32) -> Self {
        TweenScale {
            from,
            to,
            clock: TweenClock::new(duration),
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.clock.easing = easing;
        self
    }
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.clock.loop_mode = loop_mode;
        self
    }
}

/// Animates the opacity of an entity's [`Tint`](super::tint::Tint).
#[derive(Component, Clone, Debug)]
pub struct TweenAlpha {
    pub from: f32,
    pub to: f32,
    pub clock: TweenClock,
}

impl TweenAlpha {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        TweenAlpha {
            from,
            to,
            clock: TweenClock::new(duration),
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.clock.easing = easing;
        self
    }
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.clock.loop_mode = loop_mode;
        self
    }
}

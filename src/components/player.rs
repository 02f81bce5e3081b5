//! Player character state.
//!
//! [`Player`] carries the posture, facing and grounded flags read by the
//! platform selector, the physics step and the gameplay coordinator.
//! Posture geometry is not scattered across systems: every posture change
//! goes through the single [`PostureProfile`] lookup returned by
//! [`Posture::profile`], which yields the visual frame, its scale factor and
//! the hitbox derived from the *unscaled* frame.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::sprite::Sprite;

pub const ANIM_IDLE: &str = "player_idle";
pub const ANIM_WALK: &str = "player_walk";
pub const ANIM_JUMP: &str = "player_jump";
pub const ANIM_CROUCH: &str = "player_crouch";

/// Hitbox width as a fraction of the unscaled frame width.
pub const HITBOX_WIDTH_RATIO: f32 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Posture {
    #[default]
    Standing,
    Crouching,
}

/// Visual and physical geometry of one posture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureProfile {
    /// Base animation shown while in this posture.
    pub animation: &'static str,
    /// Unscaled frame size in pixels.
    pub frame: Vector2,
    /// Uniform render scale.
    pub scale: f32,
    /// Hitbox height as a fraction of the unscaled frame height.
    pub hitbox_height_ratio: f32,
}

const STANDING_PROFILE: PostureProfile = PostureProfile {
    animation: ANIM_IDLE,
    frame: Vector2 { x: 370.0, y: 230.0 },
    scale: 0.2,
    hitbox_height_ratio: 0.60,
};

const CROUCHING_PROFILE: PostureProfile = PostureProfile {
    animation: ANIM_CROUCH,
    frame: Vector2 { x: 340.0, y: 160.0 },
    scale: 0.22,
    hitbox_height_ratio: 0.40,
};

impl Posture {
    pub fn profile(self) -> &'static PostureProfile {
        match self {
            Posture::Standing => &STANDING_PROFILE,
            Posture::Crouching => &CROUCHING_PROFILE,
        }
    }
}

impl PostureProfile {
    /// Frame size once scaled, in world pixels.
    pub fn scaled_frame(&self) -> Vector2 {
        Vector2 {
            x: self.frame.x * self.scale,
            y: self.frame.y * self.scale,
        }
    }

    /// Hitbox relative to the frame-centred pivot.
    ///
    /// Computed on the unscaled frame (horizontally centred, bottom edge flush
    /// with the bottom of the frame) and then scaled.
    pub fn hitbox(&self) -> BoxCollider {
        let w = self.frame.x * HITBOX_WIDTH_RATIO;
        let h = self.frame.y * self.hitbox_height_ratio;
        let off_x = (self.frame.x - w) * 0.5;
        let off_y = self.frame.y - h;
        BoxCollider::new(w * self.scale, h * self.scale).with_offset(Vector2 {
            x: (off_x - self.frame.x * 0.5) * self.scale,
            y: (off_y - self.frame.y * 0.5) * self.scale,
        })
    }

    pub fn sprite(&self, flip_h: bool) -> Sprite {
        let mut sprite = Sprite::centered(self.frame.x, self.frame.y);
        sprite.flip_h = flip_h;
        sprite
    }
}

/// The controllable cat.
#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Horizontal walking speed in px/s.
    pub speed: f32,
    /// Vertical velocity applied on jump (negative is up).
    pub jump_velocity: f32,
    pub posture: Posture,
    /// +1 facing right, -1 facing left.
    pub facing: f32,
    /// Resting on the bound floor segment this tick.
    pub grounded: bool,
}

impl Player {
    pub fn new(speed: f32, jump_velocity: f32) -> Self {
        Self {
            speed,
            jump_velocity,
            posture: Posture::Standing,
            facing: 1.0,
            grounded: false,
        }
    }

    pub fn is_crouching(&self) -> bool {
        self.posture == Posture::Crouching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_hitbox_is_flush_with_frame_bottom() {
        for posture in [Posture::Standing, Posture::Crouching] {
            let profile = posture.profile();
            let hitbox = profile.hitbox();
            let frame = profile.scaled_frame();
            let (_, max) = hitbox.aabb(Vector2::zero());
            assert!(approx_eq(max.y, frame.y * 0.5), "{:?}", posture);
        }
    }

    #[test]
    fn test_hitbox_ratios_use_unscaled_frame() {
        let standing = Posture::Standing.profile();
        let hb = standing.hitbox();
        assert!(approx_eq(hb.size.x, 370.0 * 0.40 * 0.2));
        assert!(approx_eq(hb.size.y, 230.0 * 0.60 * 0.2));

        let crouching = Posture::Crouching.profile();
        let hb = crouching.hitbox();
        assert!(approx_eq(hb.size.x, 340.0 * 0.40 * 0.22));
        assert!(approx_eq(hb.size.y, 160.0 * 0.40 * 0.22));
    }

    #[test]
    fn test_hitbox_is_horizontally_centred() {
        let hb = Posture::Standing.profile().hitbox();
        let (min, max) = hb.aabb(Vector2::zero());
        assert!(approx_eq(min.x + max.x, 0.0));
    }

    #[test]
    fn test_new_player_stands_facing_right() {
        let p = Player::new(200.0, -360.0);
        assert_eq!(p.posture, Posture::Standing);
        assert!(!p.is_crouching());
        assert!(approx_eq(p.facing, 1.0));
        assert!(!p.grounded);
    }
}

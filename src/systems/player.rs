//! Player state machine.
//!
//! [`player_control_system`] turns input into posture, velocity, facing and
//! animation each tick. Posture changes go through [`set_posture`], which
//! keeps the feet where they were while the visual frame, scale and hitbox
//! are swapped.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{ANIM_CROUCH, ANIM_IDLE, ANIM_JUMP, ANIM_WALK, Player, Posture};
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::resources::input::InputState;

/// Switch the player to `target` posture.
///
/// No-op when the posture is unchanged. Otherwise the foot point (bottom
/// centre of the hitbox) is captured first, then sprite, scale and hitbox
/// are replaced from the posture profile, and finally the position is moved
/// so the new foot point lands on the captured one. Returns true if the
/// posture changed.
pub fn set_posture(
    player: &mut Player,
    position: &mut MapPosition,
    scale: &mut Scale,
    collider: &mut BoxCollider,
    sprite: &mut Sprite,
    target: Posture,
) -> bool {
    if player.posture == target {
        return false;
    }
    let foot = collider.bottom_center(position.pos);

    let profile = target.profile();
    *scale = Scale::uniform(profile.scale);
    *sprite = profile.sprite(sprite.flip_h);
    let enabled = collider.enabled;
    *collider = profile.hitbox();
    collider.enabled = enabled;
    player.posture = target;

    let new_foot = collider.bottom_center(position.pos);
    position.pos = position.pos + (foot - new_foot);
    debug!("Posture -> {:?}", target);
    true
}

fn face(player: &mut Player, sprite: &mut Sprite, direction: f32) {
    player.facing = direction;
    sprite.flip_h = direction < 0.0;
}

/// Apply one tick of input to the player.
///
/// Crouching is entered only on the ground with crouch held and no
/// horizontal intent; while crouched, horizontal input is ignored and both
/// velocity components stay at zero. Releasing crouch or leaving the ground
/// stands back up.
pub fn player_control_system(
    input: Res<InputState>,
    mut query: Query<(
        &mut Player,
        &mut RigidBody,
        &mut MapPosition,
        &mut Scale,
        &mut BoxCollider,
        &mut Sprite,
        &mut Animation,
    )>,
) {
    for (mut player, mut rb, mut position, mut scale, mut collider, mut sprite, mut anim) in
        query.iter_mut()
    {
        if rb.frozen {
            continue;
        }
        let player = &mut *player;

        let crouch_wanted = input.crouch.active;
        match player.posture {
            Posture::Standing => {
                if player.grounded && crouch_wanted && !input.has_horizontal_intent() {
                    set_posture(
                        player,
                        &mut position,
                        &mut scale,
                        &mut collider,
                        &mut sprite,
                        Posture::Crouching,
                    );
                }
            }
            Posture::Crouching => {
                if !crouch_wanted || !player.grounded {
                    set_posture(
                        player,
                        &mut position,
                        &mut scale,
                        &mut collider,
                        &mut sprite,
                        Posture::Standing,
                    );
                }
            }
        }

        if player.is_crouching() {
            rb.set_velocity_x(0.0);
            rb.set_velocity_y(0.0);
            anim.play(ANIM_CROUCH);
            continue;
        }

        let axis = input.horizontal_axis();
        if axis != 0.0 {
            rb.set_velocity_x(axis * player.speed);
            face(player, &mut sprite, axis);
        } else {
            rb.set_velocity_x(0.0);
        }

        if player.grounded && input.jump.just_pressed {
            rb.set_velocity_y(player.jump_velocity);
            player.grounded = false;
        }

        let key = if !player.grounded {
            ANIM_JUMP
        } else if axis != 0.0 {
            ANIM_WALK
        } else {
            ANIM_IDLE
        };
        anim.play(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn standing_parts() -> (Player, MapPosition, Scale, BoxCollider, Sprite) {
        let profile = Posture::Standing.profile();
        (
            Player::new(200.0, -360.0),
            MapPosition::new(120.0, 940.0),
            Scale::uniform(profile.scale),
            profile.hitbox(),
            profile.sprite(false),
        )
    }

    #[test]
    fn test_same_posture_is_noop() {
        let (mut p, mut pos, mut scale, mut col, mut sprite) = standing_parts();
        let before = pos.pos;
        assert!(!set_posture(
            &mut p, &mut pos, &mut scale, &mut col, &mut sprite, Posture::Standing
        ));
        assert_eq!(pos.pos, before);
    }

    #[test]
    fn test_crouch_keeps_feet() {
        let (mut p, mut pos, mut scale, mut col, mut sprite) = standing_parts();
        let foot = col.bottom_center(pos.pos);
        assert!(set_posture(
            &mut p, &mut pos, &mut scale, &mut col, &mut sprite, Posture::Crouching
        ));
        let new_foot = col.bottom_center(pos.pos);
        assert!(approx_eq(foot.x, new_foot.x));
        assert!(approx_eq(foot.y, new_foot.y));
        assert!(approx_eq(scale.scale.x, 0.22));
        assert!(approx_eq(sprite.width, 340.0));
    }

    #[test]
    fn test_round_trip_restores_feet() {
        let (mut p, mut pos, mut scale, mut col, mut sprite) = standing_parts();
        let foot = col.bottom_center(pos.pos);
        for _ in 0..10 {
            set_posture(&mut p, &mut pos, &mut scale, &mut col, &mut sprite, Posture::Crouching);
            set_posture(&mut p, &mut pos, &mut scale, &mut col, &mut sprite, Posture::Standing);
        }
        let back = col.bottom_center(pos.pos);
        assert!(approx_eq(foot.x, back.x));
        assert!(approx_eq(foot.y, back.y));
    }

    #[test]
    fn test_posture_keeps_flip_and_collider_state() {
        let (mut p, mut pos, mut scale, mut col, mut sprite) = standing_parts();
        sprite.flip_h = true;
        col.enabled = false;
        set_posture(&mut p, &mut pos, &mut scale, &mut col, &mut sprite, Posture::Crouching);
        assert!(sprite.flip_h);
        assert!(!col.enabled);
        let mut expected = Posture::Crouching.profile().hitbox();
        expected.disable();
        assert_eq!(col, expected);
    }

    #[test]
    fn test_crouched_feet_sit_on_frame_bottom() {
        let profile = Posture::Crouching.profile();
        let foot = profile.hitbox().bottom_center(Vector2::zero());
        assert!(approx_eq(foot.y, profile.scaled_frame().y * 0.5));
    }
}

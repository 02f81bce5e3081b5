//! Arcade physics step.
//!
//! Gravity, velocity integration and spin for every [`RigidBody`]. The
//! player only lands on the segment named by the active floor binding;
//! projectiles bounce on any segment. Frozen bodies are skipped.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::platform::FloorSegment;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::resources::gameconfig::GameConfig;
use crate::resources::level::LevelLayout;
use crate::resources::platformselector::PlatformSelector;
use crate::resources::worldtime::WorldTime;
use crate::systems::platform::SegmentBounds;

/// How far the feet may already be below a surface and still land on it.
pub const LANDING_SLOP: f32 = 2.0;
/// Bounces slower than this come to rest.
pub const REST_SPEED: f32 = 20.0;

/// Landing test for a body whose feet moved from `prev` to `next`.
pub fn lands_on(segment: &SegmentBounds, prev: Vector2, next: Vector2) -> bool {
    prev.y <= segment.top + LANDING_SLOP
        && next.y >= segment.top
        && next.x >= segment.left
        && next.x <= segment.right
}

#[allow(clippy::type_complexity)]
pub fn physics_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    layout: Option<Res<LevelLayout>>,
    selector: Option<Res<PlatformSelector>>,
    mut bodies: Query<
        (
            &mut MapPosition,
            &mut RigidBody,
            Option<&mut Rotation>,
            Option<&BoxCollider>,
            Option<&mut Player>,
        ),
        Without<FloorSegment>,
    >,
    segments: Query<(Entity, &MapPosition, &BoxCollider), With<FloorSegment>>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    let bound = selector
        .as_ref()
        .and_then(|s| s.bound_segment())
        .and_then(|e| segments.get(e).ok())
        .map(|(e, p, c)| SegmentBounds::from_collider(e, p, c));

    for (mut position, mut rb, rotation, collider, player) in bodies.iter_mut() {
        if rb.frozen {
            continue;
        }
        if rb.gravity {
            rb.velocity.y += config.gravity * dt;
        }

        let prev_foot = collider.map(|c| c.bottom_center(position.pos));
        position.pos = position.pos + rb.velocity * dt;
        if let Some(mut rotation) = rotation {
            rotation.degrees += rb.angular_velocity * dt;
        }

        let (Some(collider), Some(prev_foot)) = (collider, prev_foot) else {
            continue;
        };

        if let Some(mut player) = player {
            player.grounded = false;
            if rb.velocity.y >= 0.0
                && let Some(segment) = bound.as_ref()
            {
                let foot = collider.bottom_center(position.pos);
                if lands_on(segment, prev_foot, foot) {
                    position.pos.y -= foot.y - segment.top;
                    rb.velocity.y = 0.0;
                    player.grounded = true;
                }
            }
            if let Some(layout) = layout.as_ref() {
                position.pos.x = position.pos.x.clamp(0.0, layout.level_width);
            }
        } else if rb.bounce > 0.0 && rb.velocity.y > 0.0 {
            let foot = collider.bottom_center(position.pos);
            let hit = segments
                .iter()
                .map(|(e, p, c)| SegmentBounds::from_collider(e, p, c))
                .find(|s| lands_on(s, prev_foot, foot));
            if let Some(segment) = hit {
                position.pos.y -= foot.y - segment.top;
                rb.velocity.y = -rb.velocity.y * rb.bounce;
                if rb.velocity.y.abs() < REST_SPEED {
                    rb.velocity.y = 0.0;
                }
            }
        }
    }
}

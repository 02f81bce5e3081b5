//! Platform selector.
//!
//! Every tick the player may stand on at most one floor segment. The choice
//! is a pure query over the segment bounds ([`select_floor`]) plus a
//! keep/rebind decision ([`decide_binding`]) that keeps the current segment
//! while crouching as long as it stays inside the sticky window.
//! [`platform_selector_system`] applies the decision by replacing the single
//! [`PlatformCollider`] handle.

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::platform::{FloorSegment, PlatformCollider};
use crate::components::player::Player;
use crate::resources::platformselector::{FloorBinding, PlatformSelector};

/// Horizontal slack when testing whether the feet are over a segment.
pub const SPAN_TOLERANCE: f32 = 4.0;
/// A surface may be this far above the feet and still count as below them.
pub const SURFACE_TOLERANCE: f32 = 10.0;
/// Segments further below the feet than this are ignored.
pub const MAX_DROP: f32 = 180.0;
/// Lower edge of the sticky window (surface above the feet).
pub const STICKY_ABOVE: f32 = -40.0;

/// World-space extent of one floor segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentBounds {
    pub entity: Entity,
    pub left: f32,
    pub right: f32,
    /// Y of the walkable surface.
    pub top: f32,
}

impl SegmentBounds {
    pub fn from_collider(entity: Entity, position: &MapPosition, collider: &BoxCollider) -> Self {
        let (min, max) = collider.aabb(position.pos);
        Self {
            entity,
            left: min.x,
            right: max.x,
            top: min.y,
        }
    }

    /// Vertical distance from the feet down to the surface. Negative when
    /// the surface is above the feet.
    pub fn drop_from(&self, foot_y: f32) -> f32 {
        self.top - foot_y
    }

    pub fn spans(&self, x: f32) -> bool {
        x >= self.left - SPAN_TOLERANCE && x <= self.right + SPAN_TOLERANCE
    }
}

/// Nearest segment under `foot`, if any.
///
/// Candidates span the foot's x (±4px), have their surface at or below the
/// feet (10px slack) and less than 180px away. The smallest distance wins;
/// on an exact tie the first segment in `segments` is kept.
pub fn select_floor(segments: &[SegmentBounds], foot: Vector2) -> Option<SegmentBounds> {
    segments
        .iter()
        .filter(|s| s.spans(foot.x))
        .filter(|s| s.top >= foot.y - SURFACE_TOLERANCE)
        .filter(|s| s.drop_from(foot.y).abs() < MAX_DROP)
        .fold(None, |best: Option<SegmentBounds>, s| match best {
            Some(b) if b.drop_from(foot.y).abs() <= s.drop_from(foot.y).abs() => Some(b),
            _ => Some(*s),
        })
}

/// Whether a crouching player should stay bound to `segment`.
pub fn within_sticky_window(segment: &SegmentBounds, foot_y: f32) -> bool {
    let drop = segment.drop_from(foot_y);
    (STICKY_ABOVE..MAX_DROP).contains(&drop)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingDecision {
    Keep,
    Rebind(Entity),
}

/// Keep or replace the current binding.
///
/// Standing: rebind whenever the nearest candidate differs from the current
/// segment. Crouching: keep the current segment while it is inside the
/// sticky window. With no candidate at all the binding is left untouched.
pub fn decide_binding(
    current: Option<&SegmentBounds>,
    nearest: Option<&SegmentBounds>,
    crouching: bool,
    foot_y: f32,
) -> BindingDecision {
    let Some(nearest) = nearest else {
        return BindingDecision::Keep;
    };
    match current {
        Some(cur) if cur.entity == nearest.entity => BindingDecision::Keep,
        Some(cur) if crouching && within_sticky_window(cur, foot_y) => BindingDecision::Keep,
        _ => BindingDecision::Rebind(nearest.entity),
    }
}

/// Re-evaluate the player's floor binding and swap the collision handle.
pub fn platform_selector_system(
    mut commands: Commands,
    mut selector: ResMut<PlatformSelector>,
    players: Query<(Entity, &Player, &MapPosition, &BoxCollider)>,
    segments: Query<(Entity, &MapPosition, &BoxCollider), With<FloorSegment>>,
) {
    let Ok((player_entity, player, position, collider)) = players.single() else {
        return;
    };
    let foot = collider.bottom_center(position.pos);

    let bounds: Vec<SegmentBounds> = segments
        .iter()
        .map(|(e, p, c)| SegmentBounds::from_collider(e, p, c))
        .collect();
    let nearest = select_floor(&bounds, foot);
    let current = selector
        .bound_segment()
        .and_then(|seg| bounds.iter().find(|b| b.entity == seg));

    let BindingDecision::Rebind(segment) =
        decide_binding(current, nearest.as_ref(), player.is_crouching(), foot.y)
    else {
        return;
    };

    if let Some(old) = selector.binding.take() {
        commands.entity(old.handle).try_despawn();
    }
    let handle = commands
        .spawn(PlatformCollider {
            body: player_entity,
            segment,
        })
        .id();
    selector.binding = Some(FloorBinding { segment, handle });
    selector.rebinds += 1;
    debug!("Player bound to segment {:?}", segment);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(world: &mut World, left: f32, right: f32, top: f32) -> SegmentBounds {
        SegmentBounds {
            entity: world.spawn_empty().id(),
            left,
            right,
            top,
        }
    }

    // ==================== SELECT TESTS ====================

    #[test]
    fn test_nearest_below_wins() {
        let mut world = World::new();
        let low = seg(&mut world, 0.0, 100.0, 150.0);
        let high = seg(&mut world, 0.0, 100.0, 110.0);
        let picked = select_floor(&[low, high], Vector2::new(50.0, 100.0)).unwrap();
        assert_eq!(picked.entity, high.entity);
    }

    #[test]
    fn test_horizontal_tolerance() {
        let mut world = World::new();
        let s = seg(&mut world, 0.0, 100.0, 100.0);
        assert!(select_floor(&[s], Vector2::new(104.0, 100.0)).is_some());
        assert!(select_floor(&[s], Vector2::new(104.5, 100.0)).is_none());
        assert!(select_floor(&[s], Vector2::new(-4.0, 100.0)).is_some());
    }

    #[test]
    fn test_surface_above_feet_limits() {
        let mut world = World::new();
        let s = seg(&mut world, 0.0, 100.0, 90.0);
        assert!(select_floor(&[s], Vector2::new(50.0, 100.0)).is_some());
        let s = seg(&mut world, 0.0, 100.0, 89.0);
        assert!(select_floor(&[s], Vector2::new(50.0, 100.0)).is_none());
    }

    #[test]
    fn test_too_far_below_ignored() {
        let mut world = World::new();
        let s = seg(&mut world, 0.0, 100.0, 280.0);
        assert!(select_floor(&[s], Vector2::new(50.0, 100.0)).is_none());
        let s = seg(&mut world, 0.0, 100.0, 279.0);
        assert!(select_floor(&[s], Vector2::new(50.0, 100.0)).is_some());
    }

    #[test]
    fn test_surface_slightly_above_counts_by_distance() {
        let mut world = World::new();
        let above = seg(&mut world, 0.0, 100.0, 95.0);
        let below = seg(&mut world, 0.0, 100.0, 120.0);
        let picked = select_floor(&[below, above], Vector2::new(50.0, 100.0)).unwrap();
        assert_eq!(picked.entity, above.entity);
    }

    // ==================== DECISION TESTS ====================

    #[test]
    fn test_standing_binds_when_unbound() {
        let mut world = World::new();
        let s = seg(&mut world, 0.0, 100.0, 100.0);
        assert_eq!(
            decide_binding(None, Some(&s), false, 100.0),
            BindingDecision::Rebind(s.entity)
        );
    }

    #[test]
    fn test_no_candidate_keeps_binding() {
        let mut world = World::new();
        let s = seg(&mut world, 0.0, 100.0, 100.0);
        assert_eq!(decide_binding(Some(&s), None, false, 500.0), BindingDecision::Keep);
        assert_eq!(decide_binding(None, None, true, 500.0), BindingDecision::Keep);
    }

    #[test]
    fn test_standing_rebinds_to_new_nearest() {
        let mut world = World::new();
        let a = seg(&mut world, 0.0, 100.0, 100.0);
        let b = seg(&mut world, 0.0, 100.0, 102.0);
        assert_eq!(
            decide_binding(Some(&a), Some(&b), false, 101.5),
            BindingDecision::Rebind(b.entity)
        );
    }

    #[test]
    fn test_crouching_sticks_inside_window() {
        let mut world = World::new();
        let cur = seg(&mut world, 0.0, 100.0, 100.0);
        let other = seg(&mut world, 0.0, 100.0, 101.0);
        // surface 30px above the feet is still inside the window
        assert_eq!(
            decide_binding(Some(&cur), Some(&other), true, 130.0),
            BindingDecision::Keep
        );
        // 40px above is the inclusive edge
        assert_eq!(
            decide_binding(Some(&cur), Some(&other), true, 140.0),
            BindingDecision::Keep
        );
    }

    #[test]
    fn test_crouching_leaves_window() {
        let mut world = World::new();
        let cur = seg(&mut world, 0.0, 100.0, 100.0);
        let other = seg(&mut world, 0.0, 100.0, 150.0);
        assert_eq!(
            decide_binding(Some(&cur), Some(&other), true, 141.0),
            BindingDecision::Rebind(other.entity)
        );
    }

    #[test]
    fn test_crouching_without_binding_binds_nearest() {
        let mut world = World::new();
        let s = seg(&mut world, 0.0, 100.0, 100.0);
        assert_eq!(
            decide_binding(None, Some(&s), true, 100.0),
            BindingDecision::Rebind(s.entity)
        );
    }
}

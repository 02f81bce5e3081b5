//! Camera follow and screen shake.
//!
//! The camera centres on the player and never shows anything outside the
//! house. While a [`CameraShake`] is running the screen offset jitters by a
//! random amount proportional to the window size.

use bevy_ecs::prelude::*;
use raylib::prelude::{Camera2D, Vector2};

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::camera2d::{Camera2DRes, CameraShake};
use crate::resources::gameconfig::GameConfig;
use crate::resources::level::LevelLayout;
use crate::resources::worldtime::WorldTime;

/// Camera centred on a window of the given size, looking at the origin.
pub fn new_camera(width: f32, height: f32) -> Camera2D {
    Camera2D {
        target: Vector2::zero(),
        offset: Vector2::new(width * 0.5, height * 0.5),
        rotation: 0.0,
        zoom: 1.0,
    }
}

/// Keep a view of `half_view` half-extents inside `[0, bounds]`.
///
/// On an axis where the level is smaller than the view, the view is centred
/// on the level instead.
pub fn clamp_target(target: Vector2, half_view: Vector2, bounds: Vector2) -> Vector2 {
    let axis = |t: f32, half: f32, size: f32| {
        if size <= half * 2.0 {
            size * 0.5
        } else {
            t.clamp(half, size - half)
        }
    };
    Vector2::new(
        axis(target.x, half_view.x, bounds.x),
        axis(target.y, half_view.y, bounds.y),
    )
}

pub fn camera_follow_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    layout: Option<Res<LevelLayout>>,
    mut camera: ResMut<Camera2DRes>,
    mut shake: ResMut<CameraShake>,
    player: Query<&MapPosition, With<Player>>,
) {
    let (w, h) = config.window_size();
    let screen = Vector2::new(w as f32, h as f32);
    let cam = &mut camera.0;
    let half_view = screen * (0.5 / cam.zoom.max(f32::EPSILON));

    if let Ok(position) = player.single() {
        cam.target = match layout.as_deref() {
            Some(layout) => clamp_target(
                position.pos,
                half_view,
                Vector2::new(layout.level_width, layout.world_height()),
            ),
            None => position.pos,
        };
    }

    cam.offset = screen * 0.5;
    if shake.is_active() {
        let amplitude = screen * shake.intensity;
        cam.offset.x += (fastrand::f32() * 2.0 - 1.0) * amplitude.x;
        cam.offset.y += (fastrand::f32() * 2.0 - 1.0) * amplitude.y;
        shake.remaining = (shake.remaining - time.delta).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== CLAMP TESTS ====================

    #[test]
    fn test_clamp_inside_level_is_unchanged() {
        let t = clamp_target(
            Vector2::new(900.0, 500.0),
            Vector2::new(480.0, 270.0),
            Vector2::new(1800.0, 1000.0),
        );
        assert!(approx_eq(t.x, 900.0));
        assert!(approx_eq(t.y, 500.0));
    }

    #[test]
    fn test_clamp_near_edges() {
        let half = Vector2::new(480.0, 270.0);
        let bounds = Vector2::new(1800.0, 1000.0);
        let t = clamp_target(Vector2::new(10.0, 990.0), half, bounds);
        assert!(approx_eq(t.x, 480.0));
        assert!(approx_eq(t.y, 730.0));
        let t = clamp_target(Vector2::new(1790.0, 5.0), half, bounds);
        assert!(approx_eq(t.x, 1320.0));
        assert!(approx_eq(t.y, 270.0));
    }

    #[test]
    fn test_clamp_centres_small_level() {
        let t = clamp_target(
            Vector2::new(50.0, 50.0),
            Vector2::new(480.0, 270.0),
            Vector2::new(600.0, 400.0),
        );
        assert!(approx_eq(t.x, 300.0));
        assert!(approx_eq(t.y, 200.0));
    }

    // ==================== SYSTEM TESTS ====================

    #[test]
    fn test_shake_runs_out() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.1,
            ..Default::default()
        });
        world.insert_resource(GameConfig::new());
        world.insert_resource(LevelLayout::house());
        world.insert_resource(Camera2DRes(new_camera(960.0, 540.0)));
        let mut shake = CameraShake::default();
        shake.start(0.12, 0.004);
        world.insert_resource(shake);
        world.spawn((Player::new(200.0, -360.0), MapPosition::new(900.0, 500.0)));

        let mut schedule = Schedule::default();
        schedule.add_systems(camera_follow_system);
        schedule.run(&mut world);
        assert!(world.resource::<CameraShake>().is_active());
        schedule.run(&mut world);
        assert!(!world.resource::<CameraShake>().is_active());

        // settles back to the centre once the shake is over
        schedule.run(&mut world);
        let cam = world.resource::<Camera2DRes>().0;
        assert!(approx_eq(cam.offset.x, 480.0));
        assert!(approx_eq(cam.offset.y, 270.0));
        assert!(approx_eq(cam.target.x, 900.0));
    }
}

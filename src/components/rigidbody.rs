//! Arcade kinematic body.
//!
//! The [`RigidBody`] component stores linear and angular velocity and whether
//! world gravity pulls on the entity. The physics step in
//! [`crate::systems::physics`] integrates it into
//! [`MapPosition`](super::mapposition::MapPosition) and
//! [`Rotation`](super::rotation::Rotation).
//!
//! The `frozen` flag disables integration entirely. It is used when the
//! player is dead or falling out of the world and must not move anymore.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Kinematic body storing velocity, spin and gravity participation.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `angular_velocity` - Spin in degrees per second
/// - `gravity` - Whether world gravity accelerates this body
/// - `bounce` - Vertical restitution when hitting a floor (0.0 = no bounce)
/// - `frozen` - When true, the physics step skips this entity
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_gravity();
/// rb.set_velocity(Vector2 { x: 350.0, y: -200.0 });
/// rb.angular_velocity = 400.0;
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vector2,
    /// Spin in degrees per second.
    pub angular_velocity: f32,
    /// Whether world gravity applies.
    pub gravity: bool,
    /// Fraction of vertical speed kept when bouncing off a floor.
    pub bounce: f32,
    /// When true, the physics step skips all calculations for this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity that ignores gravity.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            angular_velocity: 0.0,
            gravity: false,
            bounce: 0.0,
            frozen: false,
        }
    }

    /// Create a RigidBody pulled by world gravity.
    pub fn with_gravity() -> Self {
        Self {
            gravity: true,
            ..Self::new()
        }
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    /// Set the velocity of the RigidBody.
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    /// Zero both components of the velocity.
    pub fn stop(&mut self) {
        self.velocity = Vector2 { x: 0.0, y: 0.0 };
        self.angular_velocity = 0.0;
    }

    /// Sign of the horizontal motion, defaulting to +1 when standing still.
    pub fn horizontal_direction(&self) -> f32 {
        if self.velocity.x < 0.0 { -1.0 } else { 1.0 }
    }

    /// Freeze the rigid body, preventing the physics step from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing the physics step to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== CONSTRUCTOR TESTS ====================

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert!(approx_eq(rb.velocity.x, 0.0));
        assert!(approx_eq(rb.velocity.y, 0.0));
        assert!(!rb.gravity);
        assert!(!rb.frozen);
    }

    #[test]
    fn test_rigidbody_with_gravity_and_bounce() {
        let rb = RigidBody::with_gravity().with_bounce(0.2);
        assert!(rb.gravity);
        assert!(approx_eq(rb.bounce, 0.2));
    }

    // ==================== VELOCITY TESTS ====================

    #[test]
    fn test_set_velocity_components() {
        let mut rb = RigidBody::new();
        rb.set_velocity(Vector2 { x: 1.0, y: 2.0 });
        rb.set_velocity_x(-5.0);
        assert!(approx_eq(rb.velocity.x, -5.0));
        assert!(approx_eq(rb.velocity.y, 2.0));
        rb.set_velocity_y(7.0);
        assert!(approx_eq(rb.velocity.y, 7.0));
    }

    #[test]
    fn test_stop_clears_spin() {
        let mut rb = RigidBody::new();
        rb.set_velocity(Vector2 { x: 3.0, y: 4.0 });
        rb.angular_velocity = 90.0;
        rb.stop();
        assert!(approx_eq(rb.velocity.length(), 0.0));
        assert!(approx_eq(rb.angular_velocity, 0.0));
    }

    #[test]
    fn test_horizontal_direction_defaults_to_positive() {
        let mut rb = RigidBody::new();
        assert!(approx_eq(rb.horizontal_direction(), 1.0));
        rb.set_velocity_x(-10.0);
        assert!(approx_eq(rb.horizontal_direction(), -1.0));
        rb.set_velocity_x(10.0);
        assert!(approx_eq(rb.horizontal_direction(), 1.0));
    }

    // ==================== FREEZE/UNFREEZE TESTS ====================

    #[test]
    fn test_freeze_unfreeze() {
        let mut rb = RigidBody::new();
        rb.freeze();
        assert!(rb.frozen);
        rb.unfreeze();
        assert!(!rb.frozen);
    }
}

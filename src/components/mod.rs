//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – playback state of the current animation
//! - [`boxcollider`] – axis-aligned overlap body with a consume guard flag
//! - [`collectible`] – keys and yarn pickups with their consume lifecycle
//! - [`door`] – the attic door and its lock
//! - [`enemy`] – ghost patrol/attack state
//! - [`hazard`] – environmental traps
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`persistent`] – marker for entities that survive level rebuilds
//! - [`platform`] – floor segments and the player↔floor collision handle
//! - [`player`] – posture, facing and the posture geometry table
//! - [`projectile`] – thrown yarn marker
//! - [`rigidbody`] – arcade kinematic body
//! - [`rotation`] – rotation angle in degrees
//! - [`scale`] – 2D scale factor for sprites
//! - [`sprite`] – unscaled visual frame
//! - [`tint`] – fill colour and opacity
//! - [`ttl`] – automatic despawn after a delay
//! - [`tween`] – animated interpolation of position, scale and opacity
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod boxcollider;
pub mod collectible;
pub mod door;
pub mod enemy;
pub mod hazard;
pub mod mapposition;
pub mod persistent;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod rigidbody;
pub mod rotation;
pub mod scale;
pub mod sprite;
pub mod tint;
pub mod ttl;
pub mod tween;
pub mod zindex;

//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive level rebuilds. Scene
//! systems registered in the [`SystemsStore`](crate::resources::systemsstore::SystemsStore)
//! and global observers carry it; everything else is despawned when the
//! house is reset.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that should persist across scene changes.
#[derive(Component, Clone, Debug)]
pub struct Persistent;

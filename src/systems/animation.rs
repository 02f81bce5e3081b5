//! Animation playback.
//!
//! [`animation`] advances each entity's [`Animation`] using the timing in the
//! [`AnimationStore`]. Looping animations wrap; the others hold their last
//! frame and fire an [`AnimationFinishedEvent`] once.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animation::Animation;
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

pub fn animation(
    mut query: Query<(Entity, &mut Animation)>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut anim_comp) in query.iter_mut() {
        if anim_comp.finished {
            continue;
        }
        let Some(animation) = animation_store.get(&anim_comp.animation_key) else {
            warn!("Unknown animation '{}'", anim_comp.animation_key);
            continue;
        };

        anim_comp.elapsed_time += time.delta;
        let frame_duration = 1.0 / animation.fps.max(f32::EPSILON);
        while anim_comp.elapsed_time >= frame_duration {
            anim_comp.elapsed_time -= frame_duration;
            anim_comp.frame_index += 1;

            if anim_comp.frame_index >= animation.frame_count {
                if animation.looped {
                    anim_comp.frame_index = 0;
                } else {
                    anim_comp.frame_index = animation.frame_count.saturating_sub(1);
                    anim_comp.finished = true;
                    commands.trigger(AnimationFinishedEvent {
                        entity,
                        animation_key: anim_comp.animation_key.clone(),
                    });
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::observer::On;

    #[derive(Resource, Default)]
    struct Finished(Vec<Entity>);

    fn record_finished(trigger: On<AnimationFinishedEvent>, mut finished: ResMut<Finished>) {
        finished.0.push(trigger.event().entity);
    }

    fn setup() -> World {
        let mut world = World::new();
        let mut store = AnimationStore::default();
        store.insert("loop", 2, 10.0, true);
        store.insert("once", 2, 10.0, false);
        world.insert_resource(store);
        world.insert_resource(WorldTime {
            delta: 0.1,
            ..Default::default()
        });
        world.init_resource::<Finished>();
        world.add_observer(record_finished);
        world
    }

    #[test]
    fn test_looping_animation_wraps() {
        let mut world = setup();
        let e = world.spawn(Animation::new("loop")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        schedule.run(&mut world);
        schedule.run(&mut world);
        let anim = world.get::<Animation>(e).unwrap();
        assert_eq!(anim.frame_index, 0);
        assert!(!anim.finished);
        assert!(world.resource::<Finished>().0.is_empty());
    }

    #[test]
    fn test_non_looping_fires_once() {
        let mut world = setup();
        let e = world.spawn(Animation::new("once")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        for _ in 0..5 {
            schedule.run(&mut world);
        }
        let anim = world.get::<Animation>(e).unwrap();
        assert_eq!(anim.frame_index, 1);
        assert!(anim.finished);
        assert_eq!(world.resource::<Finished>().0, vec![e]);
    }
}

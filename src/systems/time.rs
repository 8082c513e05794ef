//! Time update.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, before the schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Store the frame delta `dt` in seconds. Negative deltas count as zero.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().delta = dt.max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_world_time_keeps_last_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, 0.2);
        update_world_time(&mut world, 0.05);
        assert_eq!(world.resource::<WorldTime>().delta, 0.05);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, -1.0);
        assert_eq!(world.resource::<WorldTime>().delta, 0.0);
    }
}

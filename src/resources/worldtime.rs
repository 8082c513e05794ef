//! Frame timing shared by the systems.

use bevy_ecs::prelude::Resource;

/// Seconds covered by the current frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WorldTime {
    pub delta: f32,
}

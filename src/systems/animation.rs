//! Background animation playback.
//!
//! [`animation_system`] steps the
//! [`AnimationPlayer`](crate::resources::animation::AnimationPlayer) by the
//! frame delta at the configured speed. Binding the atlas is done by
//! [`background_system`](crate::systems::background::background_system).

use bevy_ecs::prelude::*;

use crate::render::TextureInfo;
use crate::resources::animation::AnimationPlayer;
use crate::resources::appconfig::AppConfig;
use crate::resources::worldtime::WorldTime;

/// Advance the background animation.
///
/// Contract
/// - Reads [`WorldTime`] for the frame delta.
/// - Reads the speed in frames per second from [`AppConfig`].
pub fn animation_system<T: TextureInfo + 'static>(
    mut player: NonSendMut<AnimationPlayer<T>>,
    time: Res<WorldTime>,
    config: Res<AppConfig>,
) {
    player.advance(config.animation_speed, time.delta);
}

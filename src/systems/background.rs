//! Background selection.
//!
//! When [`UiState::background_dirty`] is set, packs the selected background
//! directory into an atlas (once per background, later selections reuse the
//! pack) and binds it to the
//! [`AnimationPlayer`](crate::resources::animation::AnimationPlayer).
//! A background that fails to pack is logged and the previous one keeps
//! playing.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::render::{ImageError, Renderer};
use crate::resources::animation::AnimationPlayer;
use crate::resources::appconfig::AppConfig;
use crate::resources::atlasstore::AtlasStore;
use crate::resources::imagecache::ImageCache;
use crate::resources::uistate::UiState;

pub fn background_system<R: Renderer + 'static>(
    mut renderer: NonSendMut<R>,
    mut cache: NonSendMut<ImageCache<R::Texture>>,
    mut atlases: NonSendMut<AtlasStore<R::Texture>>,
    mut player: NonSendMut<AnimationPlayer<R::Texture>>,
    mut state: ResMut<UiState>,
    config: Res<AppConfig>,
) {
    if !state.background_dirty {
        return;
    }
    state.background_dirty = false;

    let Some(dir) = config.background_dir(state.background_index) else {
        warn!("No background configured");
        return;
    };
    let name = &config.backgrounds[state.background_index % config.backgrounds.len()];

    let bound = atlases
        .pack_directory(&mut *renderer, &mut *cache, name, &dir)
        .and_then(|canvas| {
            let entry = atlases
                .entry(name)
                .ok_or_else(|| ImageError::LookupMiss(name.clone()))?;
            player.bind(canvas);
            player.define_frames(
                entry.frame_count,
                0,
                0,
                entry.frame_width as i32,
                entry.frame_height as i32,
            );
            Ok(entry.frame_count)
        });
    match bound {
        Ok(frames) => {
            info!("Background {} playing ({} frames)", name, frames);
            cache.log_count();
        }
        Err(e) => warn!("Background {} unavailable: {}", name, e),
    }
}

//! Clock text refresh.
//!
//! Formats the local time every tick and renders the outlined clock texture
//! only when the formatted string changed.

use bevy_ecs::prelude::*;
use chrono::Local;

use crate::render::{ImageError, Renderer};
use crate::resources::appconfig::AppConfig;
use crate::resources::clock::Clock;
use crate::resources::imagecache::{ImageCache, MessageData};
use crate::resources::themes::ThemeStore;
use crate::resources::uistate::UiState;

pub fn clock_system<R: Renderer + 'static>(
    mut renderer: NonSendMut<R>,
    mut cache: NonSendMut<ImageCache<R::Texture>>,
    mut clock: NonSendMut<Clock<R::Texture>>,
    state: Res<UiState>,
    themes: Res<ThemeStore>,
    config: Res<AppConfig>,
) {
    if clock.is_suspended() || !clock.update_text(&Local::now()) {
        return;
    }
    let Some(font) = config.font_path(state.font_index) else {
        clock.suspend();
        return;
    };
    let msg = MessageData::new(
        clock.text(),
        font,
        config.clock_font_size,
        themes.active().text_color(),
    );
    match cache.render_text_outlined(&mut *renderer, &msg, config.clock_outline) {
        Ok(handle) => clock.set_handle(handle),
        Err(ImageError::FontOpen { .. }) => clock.suspend(),
        Err(_) => {}
    }
}

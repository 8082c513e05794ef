//! Button label rendering.
//!
//! When [`UiState::labels_dirty`] is set (startup, font or theme change),
//! every button label is rendered again with the selected font and the
//! active theme's text color, and the clock is invalidated so it follows.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::render::{ImageError, Renderer};
use crate::resources::appconfig::AppConfig;
use crate::resources::clock::Clock;
use crate::resources::imagecache::{ImageCache, MessageData};
use crate::resources::themes::ThemeStore;
use crate::resources::uistate::{ButtonLabels, UiState};
use crate::resources::widgetpanel::WidgetPanel;

#[allow(clippy::too_many_arguments)]
pub fn label_refresh_system<R: Renderer + 'static>(
    mut renderer: NonSendMut<R>,
    mut cache: NonSendMut<ImageCache<R::Texture>>,
    mut labels: NonSendMut<ButtonLabels<R::Texture>>,
    mut clock: NonSendMut<Clock<R::Texture>>,
    panel: NonSend<WidgetPanel<R::Texture>>,
    mut state: ResMut<UiState>,
    themes: Res<ThemeStore>,
    config: Res<AppConfig>,
) {
    if !state.labels_dirty {
        return;
    }
    state.labels_dirty = false;
    clock.invalidate();
    labels.clear();

    let Some(font) = config.font_path(state.font_index) else {
        warn!("No font configured, buttons stay unlabeled");
        return;
    };
    let color = themes.active().text_color();
    for (id, widget) in panel.iter() {
        let msg = MessageData::new(widget.label.as_str(), &font, config.ui_font_size, color);
        match cache.render_text(&mut *renderer, &msg) {
            Ok(handle) => labels.set(id, handle),
            // every other label would fail the same way
            Err(ImageError::FontOpen { .. }) => break,
            Err(_) => {}
        }
    }
    info!("Rendered {} button label(s) with {}", labels.len(), font.display());
}

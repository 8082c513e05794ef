//! Frame composition.
//!
//! Draw order:
//! 1. clear with the active theme's clear color
//! 2. current background frame at the origin
//! 3. clock centered in the window (main view only)
//! 4. visible buttons with their labels

use bevy_ecs::prelude::*;

use crate::render::Renderer;
use crate::resources::animation::AnimationPlayer;
use crate::resources::appconfig::AppConfig;
use crate::resources::clock::Clock;
use crate::resources::themes::ThemeStore;
use crate::resources::uistate::{ButtonLabels, UiState, UiView};
use crate::resources::widgetpanel::WidgetPanel;

#[allow(clippy::too_many_arguments)]
pub fn render_system<R: Renderer + 'static>(
    mut renderer: NonSendMut<R>,
    player: NonSend<AnimationPlayer<R::Texture>>,
    panel: NonSend<WidgetPanel<R::Texture>>,
    labels: NonSend<ButtonLabels<R::Texture>>,
    clock: NonSend<Clock<R::Texture>>,
    state: Res<UiState>,
    themes: Res<ThemeStore>,
    config: Res<AppConfig>,
) {
    let clear = themes.active().clear_color();
    let (window_w, window_h) = config.window_size();
    renderer.present(clear, &mut |canvas| {
        player.render(canvas, 0, 0, config.animation_scale);

        if state.view == UiView::Main {
            if let Some(text) = clock.handle() {
                let x = (window_w as i32 - text.width() as i32) / 2;
                let y = (window_h as i32 - text.height() as i32) / 2;
                text.draw(canvas, x, y, 0.0, 0.0, None);
            }
        }

        for (id, widget) in panel.iter() {
            if widget.visible {
                panel.draw(id, labels.get(id), canvas, 0.0, 0.0);
            }
        }
    });
}

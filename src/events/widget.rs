//! Button activation.
//!
//! [`WidgetActivatedEvent`] is triggered by the pointer observer for every
//! button that was clicked. [`widget_action_observer`] looks up what the
//! button does in [`ButtonActions`] and applies it:
//!
//! - view buttons switch [`UiState::view`]
//! - quit and minimize raise the matching [`WorldSignals`] flag for the
//!   window loop
//! - theme buttons activate a theme and recolor the buttons
//! - background and font buttons step through the configured lists

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::render::TextureInfo;
use crate::resources::appconfig::AppConfig;
use crate::resources::themes::{Theme, ThemeStore};
use crate::resources::uistate::{ButtonAction, ButtonActions, UiState, UiView};
use crate::resources::widgetpanel::{WidgetId, WidgetPanel};
use crate::resources::worldsignals::{MINIMIZE, QUIT, WorldSignals};

/// A widget was pressed and released while the pointer stayed over it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetActivatedEvent {
    pub widget: WidgetId,
}

#[allow(clippy::too_many_arguments)]
pub fn widget_action_observer<T: TextureInfo + 'static>(
    trigger: On<WidgetActivatedEvent>,
    actions: Res<ButtonActions>,
    mut state: ResMut<UiState>,
    mut signals: ResMut<WorldSignals>,
    mut themes: ResMut<ThemeStore>,
    config: Res<AppConfig>,
    mut panel: NonSendMut<WidgetPanel<T>>,
) {
    let Some(binding) = actions.get(trigger.event().widget) else {
        return;
    };
    info!("Button action {:?}", binding.action);
    match binding.action {
        ButtonAction::OpenSettings => state.view = UiView::Settings,
        ButtonAction::CloseSettings => state.view = UiView::Main,
        ButtonAction::OpenThemes => state.view = UiView::Themes,
        ButtonAction::CloseThemes => state.view = UiView::Settings,
        ButtonAction::Minimize => signals.set_flag(MINIMIZE),
        ButtonAction::Quit => signals.set_flag(QUIT),
        ButtonAction::ApplyTheme(index) => {
            if themes.set_active(index) {
                apply_theme(themes.active(), &mut *panel);
                state.labels_dirty = true;
            }
        }
        ButtonAction::NextBackground => {
            if config.backgrounds.len() > 1 {
                state.background_index = (state.background_index + 1) % config.backgrounds.len();
                state.background_dirty = true;
            }
        }
        ButtonAction::NextFont => {
            if config.fonts.len() > 1 {
                state.font_index = (state.font_index + 1) % config.fonts.len();
                state.labels_dirty = true;
            }
        }
    }
}

/// Recolor every widget with `theme`'s button color and feedback palette.
pub fn apply_theme<T: TextureInfo>(theme: &Theme, panel: &mut WidgetPanel<T>) {
    panel.set_palette(theme.hover_color(), theme.pressed_color());
    let ids: Vec<WidgetId> = panel.iter().map(|(id, _)| id).collect();
    for id in ids {
        panel.set_initial_color(id, theme.button_color());
    }
}

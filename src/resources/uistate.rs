//! Navigation state of the widget and the meaning of each button.
//!
//! - [`UiState`] – current view, selected background/font and pending work
//! - [`ButtonActions`] – which view a button belongs to and what it does
//! - [`ButtonLabels`] – rendered label texture of each button (non-send)

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::resources::imagecache::ResourceHandle;
use crate::resources::widgetpanel::WidgetId;

/// Screen the widget shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UiView {
    /// Background animation, clock and the settings button.
    #[default]
    Main,
    /// Minimize, quit, themes, background, font and close buttons.
    Settings,
    /// One button per theme and a back button.
    Themes,
}

/// What activating a button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    OpenSettings,
    CloseSettings,
    Minimize,
    Quit,
    OpenThemes,
    CloseThemes,
    /// Activate the theme with this index.
    ApplyTheme(usize),
    NextBackground,
    NextFont,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub view: UiView,
    /// Index into the configured backgrounds.
    pub background_index: usize,
    /// Index into the configured fonts.
    pub font_index: usize,
    /// The background must be (re)packed and bound.
    pub background_dirty: bool,
    /// Button labels and the clock must be re-rendered.
    pub labels_dirty: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            view: UiView::Main,
            background_index: 0,
            font_index: 0,
            background_dirty: true,
            labels_dirty: true,
        }
    }
}

/// Binding of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBinding {
    pub view: UiView,
    pub action: ButtonAction,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ButtonActions {
    bindings: FxHashMap<WidgetId, ButtonBinding>,
}

impl ButtonActions {
    pub fn bind(&mut self, widget: WidgetId, view: UiView, action: ButtonAction) {
        self.bindings.insert(widget, ButtonBinding { view, action });
    }

    pub fn get(&self, widget: WidgetId) -> Option<ButtonBinding> {
        self.bindings.get(&widget).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, ButtonBinding)> + '_ {
        self.bindings.iter().map(|(id, binding)| (*id, *binding))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Label textures by button.
pub struct ButtonLabels<T> {
    labels: FxHashMap<WidgetId, ResourceHandle<T>>,
}

impl<T> Default for ButtonLabels<T> {
    fn default() -> Self {
        Self {
            labels: FxHashMap::default(),
        }
    }
}

impl<T> ButtonLabels<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, widget: WidgetId, label: ResourceHandle<T>) {
        self.labels.insert(widget, label);
    }

    pub fn get(&self, widget: WidgetId) -> Option<&ResourceHandle<T>> {
        self.labels.get(&widget)
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_requests_initial_work() {
        let state = UiState::default();
        assert_eq!(state.view, UiView::Main);
        assert!(state.background_dirty);
        assert!(state.labels_dirty);
    }

    #[test]
    fn test_bind_and_get() {
        let mut actions = ButtonActions::default();
        actions.bind(WidgetId(3), UiView::Themes, ButtonAction::ApplyTheme(1));
        actions.bind(WidgetId(0), UiView::Main, ButtonAction::OpenSettings);
        actions.bind(WidgetId(2), UiView::Themes, ButtonAction::ApplyTheme(1));

        assert_eq!(
            actions.get(WidgetId(0)),
            Some(ButtonBinding {
                view: UiView::Main,
                action: ButtonAction::OpenSettings
            })
        );
        assert_eq!(actions.get(WidgetId(9)), None);
        assert_eq!(
            actions.get(WidgetId(3)).map(|binding| binding.action),
            Some(ButtonAction::ApplyTheme(1))
        );
        assert_eq!(actions.len(), 3);
    }
}

//! Button visibility per view.
//!
//! Every button belongs to one [`UiView`](crate::resources::uistate::UiView).
//! When the current view changes, buttons of that view are shown and all
//! others hidden.

use bevy_ecs::prelude::*;

use crate::render::TextureInfo;
use crate::resources::uistate::{ButtonActions, UiState};
use crate::resources::widgetpanel::WidgetPanel;

pub fn view_visibility_system<T: TextureInfo + 'static>(
    state: Res<UiState>,
    actions: Res<ButtonActions>,
    mut panel: NonSendMut<WidgetPanel<T>>,
) {
    if !(state.is_changed() || state.is_added()) {
        return;
    }
    for (id, binding) in actions.iter() {
        panel.set_visible(id, binding.view == state.view);
    }
}

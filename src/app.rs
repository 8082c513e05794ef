//! Application wiring.
//!
//! Builds the ECS world for a given [`Renderer`]: inserts the resources,
//! creates the buttons of every view, registers the observers and assembles
//! the per-tick schedule. The window loop in `main` and the integration tests
//! drive the same world, the tests on top of the software renderer.
//!
//! Layout of the 148x89 widget:
//!
//! - Main: settings button in the top-right corner
//! - Settings: close button top-right, then two columns of minimize/quit,
//!   themes/background and font
//! - Themes: back button top-left, one row per theme

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::events::input::{PointerEvent, widget_pointer_observer};
use crate::events::widget::{apply_theme, widget_action_observer};
use crate::render::{Renderer, TextureInfo};
use crate::resources::animation::AnimationPlayer;
use crate::resources::appconfig::AppConfig;
use crate::resources::atlasstore::AtlasStore;
use crate::resources::clock::Clock;
use crate::resources::imagecache::ImageCache;
use crate::resources::themes::ThemeStore;
use crate::resources::uistate::{ButtonAction, ButtonActions, ButtonLabels, UiState, UiView};
use crate::resources::widgetpanel::WidgetPanel;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_system;
use crate::systems::background::background_system;
use crate::systems::clock::clock_system;
use crate::systems::labels::label_refresh_system;
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;
use crate::systems::widget::view_visibility_system;

const MARGIN: i32 = 4;
const ROW_HEIGHT: u32 = 14;
const ROW_STEP: i32 = 18;
const CORNER_BUTTON: u32 = 12;

/// Populate `world` with everything the widget needs, taking ownership of
/// `renderer`.
pub fn setup<R: Renderer + 'static>(
    world: &mut World,
    renderer: R,
    config: AppConfig,
    themes: ThemeStore,
) {
    let mut panel: WidgetPanel<R::Texture> = WidgetPanel::new();
    let mut actions = ButtonActions::default();
    create_buttons(&mut panel, &mut actions, &config, &themes);
    apply_theme(themes.active(), &mut panel);
    info!(
        "Widget ready: {} button(s), {} theme(s)",
        panel.len(),
        themes.len()
    );

    world.insert_resource(WorldTime::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(UiState::default());
    world.insert_resource(actions);
    world.insert_non_send_resource(Clock::<R::Texture>::new(&config.clock_format));
    world.insert_resource(config);
    world.insert_resource(themes);

    world.insert_non_send_resource(renderer);
    world.insert_non_send_resource(ImageCache::<R::Texture>::new());
    world.insert_non_send_resource(AtlasStore::<R::Texture>::new());
    world.insert_non_send_resource(AnimationPlayer::<R::Texture>::new());
    world.insert_non_send_resource(ButtonLabels::<R::Texture>::new());
    world.insert_non_send_resource(panel);

    world.spawn(Observer::new(widget_pointer_observer::<R::Texture>));
    world.spawn(Observer::new(widget_action_observer::<R::Texture>));
    // Ensure the observers are registered before any pointer event.
    world.flush();
}

/// Per-tick schedule, in order: background selection, animation, view
/// visibility, labels, clock, render.
pub fn build_schedule<R: Renderer + 'static>() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            background_system::<R>,
            animation_system::<R::Texture>,
            view_visibility_system::<R::Texture>,
            label_refresh_system::<R>,
            clock_system::<R>,
            render_system::<R>,
        )
            .chain(),
    );
    update
}

/// Advance time by `dt` seconds and run one frame.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Release every texture, then the renderer.
///
/// Textures must go before the render context that created them, which
/// dropping the world does not guarantee.
pub fn teardown<R: Renderer + 'static>(world: &mut World) {
    if let Some(mut cache) = world.get_non_send_resource_mut::<ImageCache<R::Texture>>() {
        cache.clear();
    }
    world.remove_non_send_resource::<Clock<R::Texture>>();
    world.remove_non_send_resource::<ButtonLabels<R::Texture>>();
    world.remove_non_send_resource::<WidgetPanel<R::Texture>>();
    world.remove_non_send_resource::<AnimationPlayer<R::Texture>>();
    world.remove_non_send_resource::<AtlasStore<R::Texture>>();
    world.remove_non_send_resource::<ImageCache<R::Texture>>();
    world.remove_non_send_resource::<R>();
}

/// Deliver a pointer event to the widgets.
pub fn send_pointer(world: &mut World, event: PointerEvent) {
    world.trigger(event);
}

fn create_buttons<T: TextureInfo>(
    panel: &mut WidgetPanel<T>,
    actions: &mut ButtonActions,
    config: &AppConfig,
    themes: &ThemeStore,
) {
    let width = config.window_width as i32;
    let color = themes.active().button_color();
    let mut button = |label: &str, view: UiView, action: ButtonAction, x: i32, y: i32, w: u32, h: u32| {
        let id = panel.create_button(label, None, color, x, y, w, h);
        panel.show_outline(id, true);
        panel.set_visible(id, view == UiView::Main);
        actions.bind(id, view, action);
    };

    let corner_x = width - MARGIN / 2 - CORNER_BUTTON as i32;
    let column_w = ((width - 3 * MARGIN) / 2).max(1) as u32;
    let right_x = MARGIN * 2 + column_w as i32;
    let top = MARGIN + ROW_STEP - MARGIN / 2;

    // Main
    button("...", UiView::Main, ButtonAction::OpenSettings, corner_x, MARGIN / 2, CORNER_BUTTON, CORNER_BUTTON);

    // Settings
    button("x", UiView::Settings, ButtonAction::CloseSettings, corner_x, MARGIN / 2, CORNER_BUTTON, CORNER_BUTTON);
    button("Minimize", UiView::Settings, ButtonAction::Minimize, MARGIN, top, column_w, ROW_HEIGHT);
    button("Quit", UiView::Settings, ButtonAction::Quit, right_x, top, column_w, ROW_HEIGHT);
    button("Themes", UiView::Settings, ButtonAction::OpenThemes, MARGIN, top + ROW_STEP, column_w, ROW_HEIGHT);
    button("Background", UiView::Settings, ButtonAction::NextBackground, right_x, top + ROW_STEP, column_w, ROW_HEIGHT);
    button("Font", UiView::Settings, ButtonAction::NextFont, MARGIN, top + 2 * ROW_STEP, column_w, ROW_HEIGHT);

    // Themes
    button("<", UiView::Themes, ButtonAction::CloseThemes, MARGIN / 2, MARGIN / 2, CORNER_BUTTON, CORNER_BUTTON);
    let row_w = (width - 2 * MARGIN).max(1) as u32;
    for (index, theme) in themes.iter().enumerate() {
        button(
            &theme.name,
            UiView::Themes,
            ButtonAction::ApplyTheme(index),
            MARGIN,
            top + index as i32 * ROW_STEP,
            row_w,
            ROW_HEIGHT,
        );
    }
}

use anya::app;
use anya::events::input::PointerEvent;
use anya::render::raylib::RaylibRenderer;
use anya::resources::appconfig::{AppConfig, DEFAULT_CONFIG_PATH};
use anya::resources::themes::ThemeStore;
use anya::resources::worldsignals::{MINIMIZE, QUIT, WorldSignals};
use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::prelude::MouseButton;
use std::path::PathBuf;

/// Borderless desktop clock
#[derive(Parser)]
#[command(version, about = "A small borderless clock with an animated background.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AppConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }
    let themes = ThemeStore::load_or_default(&config.themes_path);

    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .undecorated()
        .title("anya")
        .build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    app::setup(&mut world, RaylibRenderer::new(rl, thread), config, themes);
    let mut update = app::build_schedule::<RaylibRenderer>();

    // --------------- Main loop ---------------
    let mut last_mouse = (i32::MIN, i32::MIN);
    loop {
        let (dt, should_close, events) = {
            let renderer = world.non_send_resource::<RaylibRenderer>();
            let rl = renderer.handle();
            (rl.get_frame_time(), rl.window_should_close(), poll_pointer(rl, &mut last_mouse))
        };
        if should_close || world.resource::<WorldSignals>().has_flag(QUIT) {
            break;
        }
        for event in events {
            app::send_pointer(&mut world, event);
        }

        app::tick(&mut world, &mut update, dt);

        if world.resource_mut::<WorldSignals>().take_flag(MINIMIZE) {
            world
                .non_send_resource_mut::<RaylibRenderer>()
                .handle_mut()
                .minimize_window();
        }
    }
    app::teardown::<RaylibRenderer>(&mut world);
    log::info!("Bye");
}

/// Translate this frame's mouse state into pointer events.
fn poll_pointer(rl: &raylib::RaylibHandle, last: &mut (i32, i32)) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let position = rl.get_mouse_position();
    let (x, y) = (position.x as i32, position.y as i32);
    if (x, y) != *last {
        *last = (x, y);
        events.push(PointerEvent::moved(x, y));
    }
    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        events.push(PointerEvent::pressed(x, y));
    }
    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        events.push(PointerEvent::released(x, y));
    }
    events
}

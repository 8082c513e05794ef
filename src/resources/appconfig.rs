//! Application configuration resource.
//!
//! Settings loaded from an INI file. Defaults describe the stock widget, so
//! the application starts even without a configuration file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 148
//! height = 89
//! target_fps = 30
//!
//! [assets]
//! dir = ./assets
//! backgrounds = anya, night
//! fonts = fonts/default.ttf
//! themes = ./assets/themes.json
//!
//! [clock]
//! format = %H:%M:%S
//! font_size = 22
//! outline = 1
//!
//! [ui]
//! font_size = 10
//!
//! [animation]
//! speed = 12.0
//! scale = 1.0
//! ```
//!
//! `backgrounds` and `fonts` are comma separated. Background entries name
//! frame directories and font entries name TrueType files, both relative to
//! `[assets] dir`.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::{Path, PathBuf};

const DEFAULT_WINDOW_WIDTH: u32 = 148;
const DEFAULT_WINDOW_HEIGHT: u32 = 89;
const DEFAULT_TARGET_FPS: u32 = 30;
const DEFAULT_ASSETS_DIR: &str = "./assets";
const DEFAULT_BACKGROUND: &str = "anya";
const DEFAULT_FONT: &str = "fonts/default.ttf";
const DEFAULT_THEMES_PATH: &str = "./assets/themes.json";
const DEFAULT_CLOCK_FORMAT: &str = "%H:%M:%S";
const DEFAULT_CLOCK_FONT_SIZE: f32 = 22.0;
const DEFAULT_CLOCK_OUTLINE: u32 = 1;
const DEFAULT_UI_FONT_SIZE: f32 = 10.0;
const DEFAULT_ANIMATION_SPEED: f32 = 12.0;
const DEFAULT_ANIMATION_SCALE: f32 = 1.0;
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Application configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Root directory of every asset path below.
    pub assets_dir: PathBuf,
    /// Background frame directories, cycled by the background button.
    pub backgrounds: Vec<String>,
    /// Font files, cycled by the font button.
    pub fonts: Vec<String>,
    /// Theme list file.
    pub themes_path: PathBuf,
    /// `chrono` format string of the clock.
    pub clock_format: String,
    pub clock_font_size: f32,
    /// Outline thickness of the clock text in pixels.
    pub clock_outline: u32,
    /// Font size of button labels.
    pub ui_font_size: f32,
    /// Background animation speed in frames per second.
    pub animation_speed: f32,
    /// Background scale, 0 draws 1:1.
    pub animation_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Create a configuration with the stock values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            backgrounds: vec![DEFAULT_BACKGROUND.to_string()],
            fonts: vec![DEFAULT_FONT.to_string()],
            themes_path: PathBuf::from(DEFAULT_THEMES_PATH),
            clock_format: DEFAULT_CLOCK_FORMAT.to_string(),
            clock_font_size: DEFAULT_CLOCK_FONT_SIZE,
            clock_outline: DEFAULT_CLOCK_OUTLINE,
            ui_font_size: DEFAULT_UI_FONT_SIZE,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            animation_scale: DEFAULT_ANIMATION_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Empty lists are ignored.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [assets] section
        if let Some(dir) = config.get("assets", "dir") {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(list) = config.get("assets", "backgrounds") {
            let backgrounds = parse_list(&list);
            if !backgrounds.is_empty() {
                self.backgrounds = backgrounds;
            }
        }
        if let Some(list) = config.get("assets", "fonts") {
            let fonts = parse_list(&list);
            if !fonts.is_empty() {
                self.fonts = fonts;
            }
        }
        if let Some(themes) = config.get("assets", "themes") {
            self.themes_path = PathBuf::from(themes);
        }

        // [clock] section
        if let Some(format) = config.get("clock", "format") {
            self.clock_format = format;
        }
        if let Some(size) = config.getfloat("clock", "font_size").ok().flatten() {
            self.clock_font_size = size as f32;
        }
        if let Some(outline) = config.getuint("clock", "outline").ok().flatten() {
            self.clock_outline = outline as u32;
        }

        // [ui] section
        if let Some(size) = config.getfloat("ui", "font_size").ok().flatten() {
            self.ui_font_size = size as f32;
        }

        // [animation] section
        if let Some(speed) = config.getfloat("animation", "speed").ok().flatten() {
            self.animation_speed = speed as f32;
        }
        if let Some(scale) = config.getfloat("animation", "scale").ok().flatten() {
            self.animation_scale = scale as f32;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, {} background(s), {} font(s)",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.backgrounds.len(),
            self.fonts.len()
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set(
            "assets",
            "dir",
            Some(self.assets_dir.to_string_lossy().into_owned()),
        );
        config.set("assets", "backgrounds", Some(self.backgrounds.join(", ")));
        config.set("assets", "fonts", Some(self.fonts.join(", ")));
        config.set(
            "assets",
            "themes",
            Some(self.themes_path.to_string_lossy().into_owned()),
        );

        config.set("clock", "format", Some(self.clock_format.clone()));
        config.set("clock", "font_size", Some(self.clock_font_size.to_string()));
        config.set("clock", "outline", Some(self.clock_outline.to_string()));

        config.set("ui", "font_size", Some(self.ui_font_size.to_string()));

        config.set("animation", "speed", Some(self.animation_speed.to_string()));
        config.set("animation", "scale", Some(self.animation_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Resolve a path relative to the assets directory.
    pub fn asset_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.assets_dir.join(relative)
    }

    /// Directory of the background at `index`, wrapping around the list.
    pub fn background_dir(&self, index: usize) -> Option<PathBuf> {
        if self.backgrounds.is_empty() {
            return None;
        }
        Some(self.asset_path(&self.backgrounds[index % self.backgrounds.len()]))
    }

    /// Font file at `index`, wrapping around the list.
    pub fn font_path(&self, index: usize) -> Option<PathBuf> {
        if self.fonts.is_empty() {
            return None;
        }
        Some(self.asset_path(&self.fonts[index % self.fonts.len()]))
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

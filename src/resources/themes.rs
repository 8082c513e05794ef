//! Color themes.
//!
//! A theme is a named palette for the clock text, button backgrounds, the
//! hover/pressed feedback colors and the screen clear color. Themes are read
//! from a JSON list:
//!
//! ```json
//! [
//!   {
//!     "name": "night",
//!     "text": [255, 255, 255, 255],
//!     "button": [40, 40, 40, 255],
//!     "hover": [0, 255, 0, 255],
//!     "pressed": [0, 0, 255, 255],
//!     "clear": [0, 0, 0, 255]
//!   }
//! ]
//! ```
//!
//! The store always holds at least the built-in default theme.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use image::Rgba;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::render::Color;

/// One named palette. Colors are RGBA arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub text: [u8; 4],
    pub button: [u8; 4],
    pub hover: [u8; 4],
    pub pressed: [u8; 4],
    pub clear: [u8; 4],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            text: [255, 255, 255, 255],
            button: [60, 60, 60, 255],
            hover: [0, 255, 0, 255],
            pressed: [0, 0, 255, 255],
            clear: [0, 0, 0, 255],
        }
    }
}

impl Theme {
    pub fn text_color(&self) -> Color {
        Rgba(self.text)
    }

    pub fn button_color(&self) -> Color {
        Rgba(self.button)
    }

    pub fn hover_color(&self) -> Color {
        Rgba(self.hover)
    }

    pub fn pressed_color(&self) -> Color {
        Rgba(self.pressed)
    }

    pub fn clear_color(&self) -> Color {
        Rgba(self.clear)
    }
}

/// Loaded themes and the index of the active one.
#[derive(Resource, Debug, Clone)]
pub struct ThemeStore {
    themes: Vec<Theme>,
    active: usize,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStore {
    /// Store holding only the built-in default theme.
    pub fn new() -> Self {
        Self {
            themes: vec![Theme::default()],
            active: 0,
        }
    }

    /// Store holding `themes`, or the default theme if the list is empty.
    pub fn from_themes(themes: Vec<Theme>) -> Self {
        if themes.is_empty() {
            return Self::new();
        }
        Self { themes, active: 0 }
    }

    /// Parse a JSON theme list.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let themes: Vec<Theme> = serde_json::from_str(json)?;
        Ok(Self::from_themes(themes))
    }

    /// Load a JSON theme list from disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json(&file_content)?;
        info!(
            "Loaded {} theme(s) from {}",
            store.len(),
            path.as_ref().display()
        );
        Ok(store)
    }

    /// Like [`load_from_file`](Self::load_from_file), falling back to the
    /// built-in default theme on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load_from_file(path.as_ref()).unwrap_or_else(|e| {
            warn!(
                "Themes from {} unavailable ({}), using the default theme",
                path.as_ref().display(),
                e
            );
            Self::new()
        })
    }

    pub fn active(&self) -> &Theme {
        &self.themes[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Make theme `index` active. Out of range indices are ignored.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.themes.len() {
            warn!("Theme index {} out of range", index);
            return false;
        }
        self.active = index;
        true
    }

    pub fn get(&self, index: usize) -> Option<&Theme> {
        self.themes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

//! Long-lived data held by the ECS world.
//!
//! Texture-bearing stores hold `Rc` handles and are inserted as non-send
//! resources; the rest are plain resources.
//!
//! Overview
//! - `animation` – sprite-sheet player for the background
//! - `appconfig` – settings loaded from the INI file
//! - `atlasstore` – directories of frames packed into one texture
//! - `clock` – formatted time and its texture
//! - `imagecache` – path-keyed texture cache and shared handles
//! - `themes` – color palettes
//! - `uistate` – current view, button bindings and labels
//! - `widgetpanel` – clickable buttons and pointer state
//! - `worldsignals` – flags for the window loop
//! - `worldtime` – simulation time and delta
pub mod animation;
pub mod appconfig;
pub mod atlasstore;
pub mod clock;
pub mod imagecache;
pub mod themes;
pub mod uistate;
pub mod widgetpanel;
pub mod worldsignals;
pub mod worldtime;

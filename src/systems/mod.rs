//! Per-tick systems.
//!
//! Submodules overview
//! - [`animation`] – advance the background animation
//! - [`background`] – pack and bind the selected background
//! - [`clock`] – format the local time and re-render the clock text
//! - [`labels`] – render button labels with the selected font
//! - [`render`] – compose and present the frame
//! - [`time`] – update simulation time and delta
//! - [`widget`] – show the buttons of the current view

pub mod animation;
pub mod background;
pub mod clock;
pub mod labels;
pub mod render;
pub mod time;
pub mod widget;

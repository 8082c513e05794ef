//! anya library.
//!
//! A borderless desktop clock: an animated background packed from a
//! directory of frames, the local time rendered as outlined text and a few
//! buttons for settings and themes. This module exposes the resource core,
//! the renderer boundary and the ECS wiring for the binary and the
//! integration tests.

pub mod app;
pub mod events;
pub mod render;
pub mod resources;
pub mod systems;

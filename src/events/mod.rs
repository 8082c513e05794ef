//! Event types and observers.
//!
//! Submodules:
//! - [`input`] – pointer motion and button events, fed to the widget panel
//! - [`widget`] – button activation and the actions it triggers
pub mod input;
pub mod widget;

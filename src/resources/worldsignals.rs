//! Global signal storage resource.
//!
//! The [`WorldSignals`] resource carries requests from the ECS side to the
//! window loop, which is not a system and cannot be reached through events.
//!
//! Flags in use:
//! - [`QUIT`] – close the window and leave the main loop
//! - [`MINIMIZE`] – iconify the window once, then cleared by the loop

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;

/// Stop the application.
pub const QUIT: &str = "quit";
/// Minimize the window.
pub const MINIMIZE: &str = "minimize";

/// Global flags for cross-system communication.
#[derive(Debug, Clone, Default, Resource)]
pub struct WorldSignals {
    /// Presence-only boolean flags; a key being present means "true".
    pub flags: FxHashSet<String>,
}

impl WorldSignals {
    /// Mark a flag as present/true.
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    /// Remove a flag. Returns whether it was set.
    pub fn take_flag(&mut self, key: &str) -> bool {
        self.flags.remove(key)
    }
    /// Check whether a flag is present/true.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut signals = WorldSignals::default();
        assert!(!signals.has_flag(QUIT));
        signals.set_flag(QUIT);
        assert!(signals.has_flag(QUIT));
        assert!(signals.take_flag(QUIT));
        assert!(!signals.take_flag(QUIT));
    }
}

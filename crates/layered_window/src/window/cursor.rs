//! Cursor visibility toggle

use glfw::CursorMode;
use log::info;

/// Tracks whether the cursor is shown and usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    enabled: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl CursorState {
    /// Whether the cursor is currently enabled
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Flip the state and return the mode to apply to the native window
    pub fn toggle(&mut self) -> CursorMode {
        let mode = if self.enabled {
            CursorMode::Disabled
        } else {
            CursorMode::Normal
        };
        self.enabled = !self.enabled;
        info!("cursor toggled, enabled: {}", self.enabled);
        mode
    }
}

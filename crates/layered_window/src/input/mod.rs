//! Input handling
//!
//! Native input events for a window are translated by [`dispatch`] into
//! updates of the active handler's [`InputState`] followed by a call to one
//! of the [`InputHandler`] hooks. Which handler is active for a window is
//! tracked by the [`HandlerRegistry`].

pub mod dispatch;
pub mod registry;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glfw::{Key, MouseButton};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

pub use dispatch::dispatch;
pub use registry::{HandlerRegistry, WindowId};

/// Handler shared between the caller and the dispatch layer
pub type SharedHandler = Arc<Mutex<dyn InputHandler>>;

/// Subscriber for translated input events
///
/// Every hook defaults to a no-op; implement the ones you care about. The
/// dispatch layer updates [`InputState`] before calling a hook, so hooks can
/// read the fresh values through [`input_state`](Self::input_state).
pub trait InputHandler: Send {
    /// Cursor, scroll and size state maintained by the dispatch layer
    fn input_state(&mut self) -> &mut InputState;

    /// The cursor moved; position and delta are in [`InputState`]
    fn cursor_update(&mut self) {}

    /// A key was pressed or released. Repeats are never delivered.
    fn key_state_update(&mut self, _key: Key, _pressed: bool) {}

    /// A mouse button was pressed or released
    fn mouse_button_update(&mut self, _button: MouseButton, _pressed: bool) {}

    /// The scroll wheel moved; offsets and totals are in [`InputState`]
    fn scroll_update(&mut self) {}

    /// The window was resized; the new size is in [`InputState`]
    fn resized(&mut self) {}

    /// The user asked to close the window. The render loop is already stopping.
    fn close(&mut self) {}

    /// A file was dropped onto the window
    fn drop_input(&mut self, _path: &Path) {}
}

/// Input state owned by a handler and written by the dispatch layer
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Cursor x position in screen coordinates
    pub cursor_x: f64,
    /// Cursor y position in screen coordinates
    pub cursor_y: f64,
    /// Cursor x movement since the previous cursor event
    pub cursor_dx: f64,
    /// Cursor y movement since the previous cursor event
    pub cursor_dy: f64,
    /// Accumulated horizontal scroll
    pub scroll_x: f64,
    /// Accumulated vertical scroll
    pub scroll_y: f64,
    /// Horizontal offset of the last scroll event
    pub scroll_dx: f64,
    /// Vertical offset of the last scroll event
    pub scroll_dy: f64,
    /// Window width from the last resize event
    pub width: i32,
    /// Window height from the last resize event
    pub height: i32,
    window: Option<WindowLink>,
}

impl InputState {
    /// The window this handler was last switched into
    pub const fn window(&self) -> Option<&WindowLink> {
        self.window.as_ref()
    }

    pub(crate) fn attach(&mut self, link: WindowLink) {
        self.window = Some(link);
    }
}

/// Non-owning back-reference from a handler to its window
#[derive(Debug, Clone)]
pub struct WindowLink {
    id: WindowId,
    running: Arc<AtomicBool>,
}

impl WindowLink {
    pub(crate) const fn new(id: WindowId, running: Arc<AtomicBool>) -> Self {
        Self { id, running }
    }

    /// Identity of the linked window
    pub const fn id(&self) -> WindowId {
        self.id
    }

    /// Whether the linked window's render loop is still running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Clear the linked window's run flag
    pub fn request_close(&self) {
        self.running.store(false, Ordering::Release);
    }
}

impl PartialEq for WindowLink {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WindowLink {}

/// Handler that only tracks [`InputState`]
#[derive(Debug, Default)]
pub struct DefaultHandler {
    state: InputState,
}

impl InputHandler for DefaultHandler {
    fn input_state(&mut self) -> &mut InputState {
        &mut self.state
    }
}

static DEFAULT_HANDLER: Lazy<SharedHandler> = Lazy::new(|| {
    let handler: SharedHandler = Arc::new(Mutex::new(DefaultHandler::default()));
    handler
});

/// The process-wide handler used when a config supplies none
pub fn default_handler() -> SharedHandler {
    Arc::clone(&DEFAULT_HANDLER)
}

//! Window lifecycle
//!
//! A [`Window`] owns one GLFW window and the render thread drawing into it.
//! The thread that created the window must pump events through
//! [`Window::wait_events`] or [`Window::poll_events`]; that is where input
//! handlers run. Pumped input is also forwarded to the render thread for
//! the UI context.

pub mod cursor;
pub mod monitor;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{self, Sender};
use glfw::{Context, OpenGlProfileHint, WindowEvent, WindowHint, WindowMode};
use log::{error, info, warn};

use crate::config::WindowConfig;
use crate::error::{RenderResult, WindowError, WindowResult};
use crate::init_guard;
use crate::input::{default_handler, HandlerRegistry, SharedHandler, WindowId};
use crate::layer::{Layer, LayerStack};
use crate::render::{GlfwSurface, RenderLoop, RenderReport, RenderThread, UiEvent};

pub use cursor::CursorState;
pub use monitor::{resolve_monitor_index, resolve_resize, work_area_size};

/// On-screen window with a layered render thread
pub struct Window {
    id: WindowId,
    glfw: glfw::Glfw,
    native: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    width: u32,
    height: u32,
    layers: LayerStack,
    running: Arc<AtomicBool>,
    cursor: CursorState,
    registry: &'static HandlerRegistry,
    ui_events: Sender<UiEvent>,
    render_thread: Option<RenderThread>,
}

impl Window {
    /// Create a window and start rendering
    ///
    /// When `config` asks for auto-fit its `width` and `height` are replaced
    /// with the target monitor's work area. Returns as soon as the render
    /// thread is spawned.
    ///
    /// # Errors
    /// Fails when GLFW cannot be initialized, auto-fit has no monitor to fit
    /// to, the native window cannot be created or the render thread cannot
    /// be spawned.
    pub fn new(config: &mut WindowConfig) -> WindowResult<Self> {
        let mut glfw = init_windowing()?;

        glfw.window_hint(WindowHint::Resizable(config.resizable));
        glfw.window_hint(WindowHint::ContextVersion(3, 3));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        #[cfg(target_os = "macos")]
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));

        let (mut native, events) = glfw.with_connected_monitors(|glfw, monitors| {
            let target = monitors.get(resolve_monitor_index(config.monitor_index, monitors.len()));

            if config.needs_auto_fit() {
                let monitor = target.ok_or_else(|| WindowError::NoMonitor {
                    title: config.title.clone(),
                })?;
                config.fit_to_work_area(work_area_size(monitor.get_workarea()));
            }

            let mode = match target {
                Some(monitor) if config.fullscreen => WindowMode::FullScreen(monitor),
                _ => WindowMode::Windowed,
            };

            glfw.create_window(config.width, config.height, &config.title, mode)
                .ok_or_else(|| WindowError::CreationFailed {
                    title: config.title.clone(),
                    width: config.width,
                    height: config.height,
                })
        })?;
        info!("created window with title {}", config.title);

        native.set_key_polling(true);
        native.set_drag_and_drop_polling(true);
        native.set_size_polling(true);
        native.set_cursor_pos_polling(true);
        native.set_close_polling(true);
        native.set_mouse_button_polling(true);
        native.set_scroll_polling(true);

        let running = Arc::new(AtomicBool::new(true));
        let registry = HandlerRegistry::global();
        let handler = config.handler.clone().unwrap_or_else(default_handler);
        let id = registry.register(Arc::clone(&running), handler);

        let layers = LayerStack::new();
        let size = (config.width, config.height);
        let (ui_events, ui_receiver) = channel::unbounded();
        let render_loop = RenderLoop::new(
            GlfwSurface::new(&mut native),
            layers.clone(),
            Arc::clone(&running),
            size,
        )
        .with_ui_events(ui_receiver);
        let render_thread = match RenderThread::spawn(format!("render: {}", config.title), render_loop) {
            Ok(thread) => thread,
            Err(err) => {
                registry.unregister(id);
                return Err(err.into());
            }
        };

        Ok(Self {
            id,
            glfw,
            native,
            events,
            width: size.0,
            height: size.1,
            layers,
            running,
            cursor: CursorState::default(),
            registry,
            ui_events,
            render_thread: Some(render_thread),
        })
    }

    /// Identity used by the handler registry
    pub const fn id(&self) -> WindowId {
        self.id
    }

    /// Current size in screen coordinates
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the render loop is still running
    ///
    /// Also false once the render thread has failed to start; see
    /// [`render_status`](Self::render_status) for why.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// How the render thread ended, or `None` while it is still running
    pub fn render_status(&mut self) -> Option<RenderResult<RenderReport>> {
        self.render_thread.as_mut().and_then(RenderThread::status)
    }

    /// Stop the render loop as if the user had closed the window
    ///
    /// The active handler's `close` hook is not called.
    pub fn request_close(&mut self) {
        self.running.store(false, Ordering::Release);
        self.native.set_should_close(true);
        self.glfw.post_empty_event();
    }

    /// Stop the render loop and wait for the render thread to exit
    ///
    /// Returns `None` if the thread was already joined.
    pub fn join_render_thread(&mut self) -> Option<RenderResult<RenderReport>> {
        self.running.store(false, Ordering::Release);
        self.render_thread.take().map(RenderThread::join)
    }

    /// Make `handler` the active input handler
    ///
    /// `None` is a no-op returning `None`; otherwise the previous handler is
    /// returned. Events already pumped are not redelivered.
    pub fn switch_handler(&self, handler: Option<SharedHandler>) -> Option<SharedHandler> {
        self.registry.switch(self.id, handler)
    }

    /// The active input handler
    pub fn handler(&self) -> Option<SharedHandler> {
        self.registry.active(self.id)
    }

    /// Add a layer behind every layer added before it
    pub fn add_layer(&self, layer: Arc<dyn Layer>) {
        self.layers.push(layer);
    }

    /// Stop rendering `layer`, returning whether it was present
    pub fn remove_layer(&self, layer: &Arc<dyn Layer>) -> bool {
        self.layers.remove(layer)
    }

    /// Number of layers rendered each frame
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Resize the window; a zero dimension keeps its current value
    pub fn resize(&mut self, width: u32, height: u32) {
        (self.width, self.height) = resolve_resize((self.width, self.height), (width, height));
        self.native.set_size(to_coordinate(self.width), to_coordinate(self.height));
    }

    /// Toggle between a normal and a disabled (captured) cursor
    pub fn toggle_cursor(&mut self) {
        let mode = self.cursor.toggle();
        self.native.set_cursor_mode(mode);
    }

    /// Whether the cursor is currently enabled
    pub const fn cursor_enabled(&self) -> bool {
        self.cursor.is_enabled()
    }

    /// Block until at least one event arrives, then dispatch pending events
    pub fn wait_events(&mut self) {
        self.glfw.wait_events();
        self.dispatch_pending();
    }

    /// Like [`wait_events`](Self::wait_events) but gives up after `timeout`
    pub fn wait_events_timeout(&mut self, timeout: Duration) {
        self.glfw.wait_events_timeout(timeout.as_secs_f64());
        self.dispatch_pending();
    }

    /// Dispatch pending events without blocking
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
        self.dispatch_pending();
    }

    fn dispatch_pending(&mut self) {
        for (_, event) in glfw::flush_messages(&self.events) {
            if let WindowEvent::Size(width, height) = event {
                self.width = u32::try_from(width).unwrap_or(0);
                self.height = u32::try_from(height).unwrap_or(0);
            }
            for ui_event in UiEvent::from_window_event(&event) {
                // Disconnected when this window's render thread has no UI.
                let _ = self.ui_events.send(ui_event);
            }
            self.registry.dispatch(self.id, &event);
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        self.registry.unregister(self.id);

        if let Some(render_thread) = self.render_thread.take() {
            match render_thread.join() {
                Ok(report) => {
                    info!("render thread for window {:?} exited after {} frames", self.id, report.frames);
                }
                Err(err) => warn!("render thread for window {:?} failed: {}", self.id, err),
            }
        }
        // `native` is dropped after this, once the render thread is gone.
    }
}

/// Get a GLFW handle, initializing the library on first use
///
/// glfw-rs reference counts its handles and terminates GLFW when the last
/// one drops, then initializes it again on the next `glfw::init`.
/// [`init_guard::WINDOWING`] therefore records that initialization has
/// succeeded once in this process, not that GLFW is live right now; every
/// window holds its own handle, which keeps the library up while it exists.
fn init_windowing() -> WindowResult<glfw::Glfw> {
    let mut glfw = None;
    let initialized = init_guard::WINDOWING.ensure_initialized(|| {
        glfw = glfw::init(log_glfw_error).ok();
        glfw.is_some()
    });
    if !initialized {
        return Err(WindowError::InitializationFailed);
    }

    match glfw {
        Some(glfw) => Ok(glfw),
        // Initialized before; takes another reference, or reinitializes if
        // every earlier window is gone.
        None => glfw::init(log_glfw_error).map_err(|err| {
            error!("GLFW reinitialization failed: {:?}", err);
            WindowError::InitializationFailed
        }),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn log_glfw_error(err: glfw::Error, description: String) {
    error!("GLFW error {:?}: {}", err, description);
}

fn to_coordinate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

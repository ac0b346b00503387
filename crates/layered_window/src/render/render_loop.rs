//! Per-window frame loop
//!
//! ```text
//! INIT ──▶ RUNNING ──(run flag cleared)──▶ STOPPED
//! ```
//!
//! INIT makes the context current, acquires and binds the UI context and
//! loads the OpenGL functions. RUNNING renders the layer stack inside a UI
//! frame, draws the UI on top, presents and sleeps out the rest of the frame
//! period. The run flag is only checked between frames; a frame in progress
//! always completes. A failed INIT clears the run flag itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{self, Receiver};
use log::{debug, error, warn};

use super::pacing::FramePacer;
use super::surface::RenderSurface;
use super::ui::UiContext;
use super::ui_events::UiEvent;
use crate::error::{RenderError, RenderResult};
use crate::init_guard::{self, InitGuard};
use crate::layer::{Frame, LayerStack};

/// Lifecycle state of a render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Context and libraries are being set up
    Init,
    /// Frames are being produced
    Running,
    /// The run flag was cleared and the loop exited
    Stopped,
}

/// Summary returned when a render loop stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    /// Frames presented
    pub frames: u64,
    /// Whether this loop owned the UI context
    pub had_ui: bool,
}

/// Frame loop for one window
pub struct RenderLoop<S: RenderSurface> {
    surface: S,
    layers: LayerStack,
    running: Arc<AtomicBool>,
    size: (u32, u32),
    pacer: FramePacer,
    ui_guard: Option<&'static InitGuard>,
    ui_events: Option<Receiver<UiEvent>>,
    loader_guard: &'static InitGuard,
    state: RenderState,
}

impl<S: RenderSurface> RenderLoop<S> {
    /// Create a loop that renders `layers` onto `surface` while `running` is set
    pub fn new(surface: S, layers: LayerStack, running: Arc<AtomicBool>, size: (u32, u32)) -> Self {
        Self {
            surface,
            layers,
            running,
            size,
            pacer: FramePacer::default(),
            ui_guard: Some(&init_guard::UI_CONTEXT),
            ui_events: None,
            loader_guard: &init_guard::GRAPHICS_LOADER,
            state: RenderState::Init,
        }
    }

    /// Run without acquiring the UI context
    #[must_use]
    pub const fn without_ui(mut self) -> Self {
        self.ui_guard = None;
        self
    }

    /// Feed the UI context from `events`
    #[must_use]
    pub fn with_ui_events(mut self, events: Receiver<UiEvent>) -> Self {
        self.ui_events = Some(events);
        self
    }

    #[must_use]
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn with_min_frame_delay(mut self, delay: Duration) -> Self {
        self.pacer = FramePacer::new(delay);
        self
    }

    #[must_use]
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) const fn with_loader_guard(mut self, guard: &'static InitGuard) -> Self {
        self.loader_guard = guard;
        self
    }

    /// Current lifecycle state
    pub const fn state(&self) -> RenderState {
        self.state
    }

    /// Run INIT then RUNNING until the run flag is cleared
    ///
    /// A graphics loader failure ends the loop before the first frame and
    /// clears the run flag. A UI failure is logged and the loop continues
    /// without UI.
    pub fn run(mut self) -> RenderResult<RenderReport> {
        debug!("render thread started");
        let mut ui = match self.init() {
            Ok(ui) => ui,
            Err(err) => {
                self.running.store(false, Ordering::Release);
                self.state = RenderState::Stopped;
                return Err(err);
            }
        };

        self.state = RenderState::Running;
        self.pacer.reset();
        let mut frames = 0;
        while self.running.load(Ordering::Acquire) {
            let layers = &self.layers;
            match ui.as_mut() {
                Some(context) => {
                    let built = context.frame(|ui| layers.render_all(&mut Frame::new(frames, Some(ui))));
                    if let Err(err) = built {
                        warn!("UI frame {} not drawn: {}", frames, err);
                    }
                }
                None => layers.render_all(&mut Frame::new(frames, None)),
            }
            self.surface.swap_buffers();
            self.pacer.pace();
            frames += 1;
        }

        self.state = RenderState::Stopped;
        debug!("render thread stopped after {} frames", frames);
        Ok(RenderReport {
            frames,
            had_ui: ui.is_some(),
        })
    }

    fn init(&mut self) -> RenderResult<Option<UiContext>> {
        self.surface.make_current();

        let events = self.ui_events.take().unwrap_or_else(channel::never);
        let mut ui = self.ui_guard.and_then(UiContext::acquire).and_then(|mut ui| {
            match ui.bind_window(self.size, events) {
                Ok(()) => Some(ui),
                Err(err) => {
                    warn!("continuing without UI: {}", err);
                    None
                }
            }
        });

        let surface = &mut self.surface;
        if !self.loader_guard.ensure_initialized(|| surface.load_graphics()) {
            error!("{} unavailable, render loop not started", self.loader_guard.name());
            return Err(RenderError::GraphicsLoader);
        }

        if let Some(context) = ui.as_mut() {
            if let Err(err) = context.bind_renderer(|symbol| surface.proc_address(symbol)) {
                warn!("continuing without UI: {}", err);
                ui = None;
            }
        }

        Ok(ui)
    }
}

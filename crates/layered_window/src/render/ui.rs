//! Dear ImGui integration
//!
//! The ImGui context is created once per process, with docking enabled, by
//! the first render thread that asks for it. That thread keeps it for as
//! long as it runs; render threads of later windows run without UI.
//!
//! Binding a window has two halves. The platform half takes the window size
//! and the channel the event thread forwards [`UiEvent`]s on. The renderer
//! half builds the font atlas, shaders and buffers through
//! `imgui-glow-renderer` once the OpenGL context is current.

use std::ffi::c_void;
use std::time::Instant;

use crossbeam::channel::Receiver;
use imgui::ConfigFlags;
use imgui_glow_renderer::{glow, AutoRenderer};
use log::{debug, error, info};

use super::ui_events::UiEvent;
use crate::error::{RenderError, RenderResult};
use crate::init_guard::InitGuard;

/// Shader version the OpenGL context is created for
///
/// The renderer picks its shader dialect from the context; this is the
/// version it resolves to under the requested 3.3 core profile.
pub const GLSL_VERSION: &str = "#version 330 core";

/// ImGui context owned by one render thread
pub struct UiContext {
    imgui: imgui::Context,
    events: Option<Receiver<UiEvent>>,
    renderer: Option<AutoRenderer>,
    last_frame: Instant,
}

impl UiContext {
    /// Create the process-wide context unless `guard` says it already exists
    pub fn acquire(guard: &InitGuard) -> Option<Self> {
        let mut created = None;
        guard.ensure_initialized(|| {
            let mut imgui = imgui::Context::create();
            imgui.set_ini_filename(None);
            imgui.io_mut().config_flags |= ConfigFlags::DOCKING_ENABLE;
            created = Some(Self {
                imgui,
                events: None,
                renderer: None,
                last_frame: Instant::now(),
            });
            true
        });

        if created.is_none() {
            debug!("{} is owned by another render thread", guard.name());
        }
        created
    }

    /// Bind the platform side of the context to a window
    ///
    /// `events` carries the window's input from the event thread.
    #[allow(clippy::cast_precision_loss)]
    pub fn bind_window(&mut self, size: (u32, u32), events: Receiver<UiEvent>) -> RenderResult<()> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            error!("cannot bind UI to a {}x{} window", width, height);
            return Err(RenderError::UiBinding(format!("zero sized window {width}x{height}")));
        }

        self.imgui
            .set_platform_name(Some(format!("{}-glfw", env!("CARGO_PKG_NAME"))));

        let io = self.imgui.io_mut();
        io.display_size = [width as f32, height as f32];
        io.display_framebuffer_scale = [1.0, 1.0];
        self.events = Some(events);
        Ok(())
    }

    /// Bind the renderer side through the current context's function loader
    ///
    /// Uploads the font atlas. Must run on the thread whose OpenGL context
    /// `loader` resolves against, with that context current.
    #[allow(unsafe_code)]
    pub fn bind_renderer(&mut self, loader: impl FnMut(&str) -> *const c_void) -> RenderResult<()> {
        // SAFETY: the caller made the context current and `loader` resolves
        // symbols from that same context.
        let gl = unsafe { glow::Context::from_loader_function(loader) };
        let renderer = AutoRenderer::initialize(gl, &mut self.imgui)
            .map_err(|err| RenderError::UiBinding(err.to_string()))?;

        info!(
            "UI renderer bound: {}",
            self.imgui.renderer_name().unwrap_or("unnamed")
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Whether draw data is being sent to OpenGL
    pub const fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Feed every forwarded event into the context, returning how many there were
    pub fn apply_pending_events(&mut self) -> usize {
        let Some(events) = &self.events else {
            return 0;
        };

        let io = self.imgui.io_mut();
        let mut applied = 0;
        for event in events.try_iter() {
            event.apply(io);
            applied += 1;
        }
        applied
    }

    /// Run one UI frame
    ///
    /// Applies pending input, starts a new frame, lets `build` draw into it
    /// and then renders the result on top of whatever `build` drew with
    /// OpenGL directly.
    pub fn frame(&mut self, build: impl FnOnce(&mut imgui::Ui)) -> RenderResult<()> {
        self.apply_pending_events();

        let now = Instant::now();
        self.imgui.io_mut().update_delta_time(now - self.last_frame);
        self.last_frame = now;

        build(self.imgui.new_frame());

        let draw_data = self.imgui.render();
        match &mut self.renderer {
            Some(renderer) => renderer.render(draw_data).map_err(RenderError::UiRender),
            None => Ok(()),
        }
    }

    /// Access the underlying ImGui context
    pub fn context_mut(&mut self) -> &mut imgui::Context {
        &mut self.imgui
    }
}

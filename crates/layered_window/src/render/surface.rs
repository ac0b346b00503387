//! Context operations used by the render thread

use std::ffi::c_void;

use glfw::Context;

/// The part of a native window the render thread drives
///
/// Implementations must be movable to the render thread.
pub trait RenderSurface: Send {
    /// Make this surface's graphics context current on the calling thread
    fn make_current(&mut self);

    /// Resolve OpenGL function pointers through this surface's context
    ///
    /// Returns whether the core functions were found.
    fn load_graphics(&mut self) -> bool;

    /// Address of an OpenGL function in this surface's context
    fn proc_address(&mut self, symbol: &str) -> *const c_void;

    /// Present the back buffer
    fn swap_buffers(&mut self);
}

/// GLFW render context of one window
pub struct GlfwSurface {
    context: glfw::PRenderContext,
}

impl GlfwSurface {
    /// Take the render context of `window`
    pub fn new(window: &mut glfw::PWindow) -> Self {
        Self {
            context: window.render_context(),
        }
    }
}

impl RenderSurface for GlfwSurface {
    fn make_current(&mut self) {
        self.context.make_current();
    }

    fn load_graphics(&mut self) -> bool {
        gl::load_with(|symbol| self.proc_address(symbol));
        gl::Viewport::is_loaded() && gl::Clear::is_loaded()
    }

    fn proc_address(&mut self, symbol: &str) -> *const c_void {
        self.context.get_proc_address(symbol)
    }

    fn swap_buffers(&mut self) {
        self.context.swap_buffers();
    }
}

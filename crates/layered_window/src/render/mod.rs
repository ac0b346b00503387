//! Render thread subsystem
//!
//! Each window runs one [`RenderLoop`] on its own [`RenderThread`]. The loop
//! makes the window's context current, initializes the UI context and the
//! OpenGL loader, then renders the window's layers and presents at a capped
//! rate until the window's run flag is cleared.
//!
//! # Module Organization
//!
//! - **`surface`**: the context operations the loop needs from the native window
//! - **`pacing`**: frame rate cap
//! - **`ui`**: process-wide ImGui context, per-window binding and renderer
//! - **`ui_events`**: window input forwarded to the UI context
//! - **`render_loop`**: the INIT, RUNNING, STOPPED state machine
//! - **`thread`**: spawning and joining the render thread

pub mod pacing;
pub mod render_loop;
pub mod surface;
pub mod thread;
pub mod ui;
pub mod ui_events;

pub use pacing::{FramePacer, MIN_FRAME_DELAY};
pub use render_loop::{RenderLoop, RenderReport, RenderState};
pub use surface::{GlfwSurface, RenderSurface};
pub use thread::RenderThread;
pub use ui::{UiContext, GLSL_VERSION};
pub use ui_events::UiEvent;

//! # Layered Window
//!
//! A thin window abstraction over GLFW, OpenGL and Dear ImGui.
//!
//! ## Features
//!
//! - **One Window, One Render Thread**: each [`Window`] owns a native GLFW
//!   window and a dedicated thread that composes its layers at a capped rate
//! - **Input Handlers**: native input events are translated and dispatched to
//!   a swappable [`InputHandler`]
//! - **Layers**: ordered [`Layer`] stack rendered every frame
//! - **Dear ImGui**: layers can add widgets to a UI frame that is drawn on
//!   top once all layers have rendered
//! - **Lazy Library Init**: GLFW, the GL loader and the ImGui context are
//!   initialized once per process on first use
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use layered_window::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     let mut config = WindowConfig::new("demo").with_size(800, 600);
//!     let mut window = Window::new(&mut config)?;
//!
//!     while window.is_running() {
//!         window.wait_events();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod error;
pub mod init_guard;
pub mod input;
pub mod layer;
pub mod logging;
pub mod render;
pub mod window;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError, WindowConfig};
pub use error::{RenderError, RenderResult, WindowError, WindowResult};
pub use input::{default_handler, InputHandler, InputState, SharedHandler, WindowId, WindowLink};
pub use layer::{Frame, Layer, LayerStack};
pub use window::Window;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, WindowConfig},
        error::{RenderError, WindowError},
        input::{default_handler, InputHandler, InputState, SharedHandler, WindowLink},
        layer::{Frame, Layer},
        window::Window,
    };
    pub use glfw::{Key, MouseButton};
}

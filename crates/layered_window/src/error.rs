//! Error types for window construction and the render thread

use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// Auto-fit was requested but no monitor is connected
    #[error("No monitor available to size window '{title}'")]
    NoMonitor {
        /// Title of the window being created
        title: String,
    },

    /// The native window could not be created
    #[error("Window creation failed for '{title}' ({width}x{height})")]
    CreationFailed {
        /// Title of the window being created
        title: String,
        /// Requested width in screen coordinates
        width: u32,
        /// Requested height in screen coordinates
        height: u32,
    },

    /// The render thread could not be spawned
    #[error("Failed to spawn render thread: {0}")]
    RenderThread(#[from] std::io::Error),
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Render thread errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// OpenGL function pointers could not be loaded
    #[error("Graphics loader initialization failed")]
    GraphicsLoader,

    /// The UI context could not be bound to this window
    #[error("UI binding failed: {0}")]
    UiBinding(String),

    /// Draw data could not be sent to OpenGL
    #[error("UI render failed: {0}")]
    UiRender(String),

    /// The render thread panicked before it could report a result
    #[error("Render thread panicked")]
    ThreadPanicked,
}

/// Result alias for render thread operations
pub type RenderResult<T> = Result<T, RenderError>;

//! Configuration system
//!
//! Window configuration can be built in code or loaded from `.toml` and
//! `.ron` files. The input handler is never serialized.

use std::fmt;
use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::input::SharedHandler;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            Some("ron") => Self::from_ron_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Parse configuration from TOML text
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse configuration from RON text
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Window creation parameters
///
/// Read once by [`Window::new`](crate::Window::new). A zero `width` or
/// `height` asks for the target monitor's work area, in which case both
/// fields are overwritten with the resolved size.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Index of the monitor to place the window on; out of range means monitor 0
    pub monitor_index: usize,
    /// Width in screen coordinates, 0 for auto-fit
    pub width: u32,
    /// Height in screen coordinates, 0 for auto-fit
    pub height: u32,
    /// Window title
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Bind the window to the target monitor in fullscreen mode
    pub fullscreen: bool,
    /// Handler receiving input events, `None` for the shared default handler
    #[serde(skip)]
    pub handler: Option<SharedHandler>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            monitor_index: 0,
            width: 0,
            height: 0,
            title: String::from("layered window"),
            resizable: true,
            fullscreen: false,
            handler: None,
        }
    }
}

impl fmt::Debug for WindowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowConfig")
            .field("monitor_index", &self.monitor_index)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("title", &self.title)
            .field("resizable", &self.resizable)
            .field("fullscreen", &self.fullscreen)
            .field("handler", &self.handler.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

impl Config for WindowConfig {}

impl WindowConfig {
    /// Create a config with the given title and default everything else
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Select the target monitor
    #[must_use]
    pub const fn with_monitor(mut self, monitor_index: usize) -> Self {
        self.monitor_index = monitor_index;
        self
    }

    /// Request an explicit size, 0 in either dimension means auto-fit
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set whether the window is resizable
    #[must_use]
    pub const fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set whether the window opens fullscreen on the target monitor
    #[must_use]
    pub const fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Install an input handler
    #[must_use]
    pub fn with_handler(mut self, handler: SharedHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// True when either dimension is zero and the window should fill the work area
    pub const fn needs_auto_fit(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Replace both dimensions with `work_area` when auto-fit is requested
    ///
    /// Returns whether the config was changed.
    pub fn fit_to_work_area(&mut self, work_area: (u32, u32)) -> bool {
        if !self.needs_auto_fit() {
            return false;
        }
        (self.width, self.height) = work_area;
        true
    }
}

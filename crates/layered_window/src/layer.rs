//! Renderable layers
//!
//! A window paints its [`LayerStack`] every frame, most recently added
//! layer first. The earliest added layer is therefore drawn last, on top.

use std::sync::Arc;

use parking_lot::RwLock;

/// One renderable unit in a window's paint stack
pub trait Layer: Send + Sync {
    /// Draw this layer into the current frame
    fn render(&self, frame: &mut Frame<'_>);
}

/// Per-frame data handed to each layer
pub struct Frame<'a> {
    index: u64,
    ui: Option<&'a mut imgui::Ui>,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(index: u64, ui: Option<&'a mut imgui::Ui>) -> Self {
        Self { index, ui }
    }

    /// Number of frames presented before this one
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// The UI frame being built, when this window's render thread owns the
    /// UI context
    ///
    /// Widgets added here are drawn after every layer has rendered.
    pub fn ui(&mut self) -> Option<&mut imgui::Ui> {
        self.ui.as_deref_mut()
    }
}

/// Ordered, shareable list of layers
///
/// Cloning yields another handle to the same list. The render thread reads
/// a snapshot each frame, so layers may be added or removed at any time.
#[derive(Clone, Default)]
pub struct LayerStack {
    layers: Arc<RwLock<Vec<Arc<dyn Layer>>>>,
}

impl LayerStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer
    pub fn push(&self, layer: Arc<dyn Layer>) {
        self.layers.write().push(layer);
    }

    /// Remove every occurrence of `layer`, returning whether one was found
    pub fn remove(&self, layer: &Arc<dyn Layer>) -> bool {
        let mut layers = self.layers.write();
        let before = layers.len();
        layers.retain(|existing| !Arc::ptr_eq(existing, layer));
        layers.len() != before
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.read().len()
    }

    /// Whether the stack is empty
    pub fn is_empty(&self) -> bool {
        self.layers.read().is_empty()
    }

    /// Copy of the current layer list in insertion order
    pub fn snapshot(&self) -> Vec<Arc<dyn Layer>> {
        self.layers.read().clone()
    }

    /// Render every layer in reverse insertion order
    pub fn render_all(&self, frame: &mut Frame<'_>) {
        for layer in self.snapshot().iter().rev() {
            layer.render(frame);
        }
    }
}

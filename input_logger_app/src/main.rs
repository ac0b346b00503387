//! Opens one window, logs every input event and clears it to a solid color.
//!
//! Usage: `input_logger [config.toml|config.ron]`

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use layered_window::prelude::*;
use parking_lot::Mutex;

/// Logs everything it receives
#[derive(Default)]
struct InputLogger {
    state: InputState,
    toggle_cursor: bool,
}

impl InputHandler for InputLogger {
    fn input_state(&mut self) -> &mut InputState {
        &mut self.state
    }

    fn cursor_update(&mut self) {
        log::trace!(
            "cursor pos: {} {}  delta: {} {}",
            self.state.cursor_x,
            self.state.cursor_y,
            self.state.cursor_dx,
            self.state.cursor_dy
        );
    }

    fn key_state_update(&mut self, key: Key, pressed: bool) {
        log::trace!("key {:?} was {}", key, if pressed { "pressed" } else { "released" });
        if key == Key::C && pressed {
            self.toggle_cursor = true;
        }
    }

    fn mouse_button_update(&mut self, button: MouseButton, pressed: bool) {
        log::trace!("mouse {:?} was {}", button, if pressed { "pressed" } else { "released" });
    }

    fn scroll_update(&mut self) {
        log::debug!(
            "scroll: {} {}  delta: {} {}",
            self.state.scroll_x,
            self.state.scroll_y,
            self.state.scroll_dx,
            self.state.scroll_dy
        );
    }

    fn resized(&mut self) {
        log::debug!("window size {} x {}", self.state.width, self.state.height);
    }

    fn close(&mut self) {
        log::debug!("window closed");
    }

    fn drop_input(&mut self, path: &Path) {
        log::debug!("dropped {}", path.display());
    }
}

/// Clears the framebuffer to a fixed color
struct ClearLayer {
    color: [f32; 4],
}

impl Layer for ClearLayer {
    fn render(&self, _frame: &mut Frame<'_>) {
        let [r, g, b, a] = self.color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

/// Shows the frame counter in a UI window
struct StatusLayer;

impl Layer for StatusLayer {
    fn render(&self, frame: &mut Frame<'_>) {
        let index = frame.index();
        if let Some(ui) = frame.ui() {
            ui.window("input logger").build(|| {
                ui.text(format!("frame {index}"));
                ui.text("press C to toggle the cursor");
            });
        }
    }
}

fn load_config() -> Result<WindowConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading window config from {}", path);
            Ok(WindowConfig::load_from_file(path)?)
        }
        None => Ok(WindowConfig::new("input logger").with_size(800, 600)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    log::info!("starting input logger");

    let logger = Arc::new(Mutex::new(InputLogger::default()));
    let mut config = load_config()?.with_handler(logger.clone());

    let mut window = Window::new(&mut config)?;
    log::info!("window size resolved to {}x{}", config.width, config.height);

    // Added last, so it clears before the status layer draws.
    window.add_layer(Arc::new(StatusLayer));
    window.add_layer(Arc::new(ClearLayer {
        color: [0.7, 0.1, 0.1, 1.0],
    }));

    while window.is_running() {
        window.wait_events_timeout(Duration::from_millis(100));
        if std::mem::take(&mut logger.lock().toggle_cursor) {
            window.toggle_cursor();
        }
    }

    if let Some(Err(err)) = window.join_render_thread() {
        log::error!("render thread failed: {}", err);
        return Err(err.into());
    }

    log::info!("input logger finished");
    Ok(())
}

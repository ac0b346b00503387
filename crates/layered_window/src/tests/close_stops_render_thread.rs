//! Drives a render loop on its own thread and stops it through a dispatched
//! close event, the way a window does.

use std::ffi::c_void;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use glfw::WindowEvent;
use parking_lot::Mutex;

use crate::init_guard::InitGuard;
use crate::input::{HandlerRegistry, InputHandler, InputState};
use crate::layer::{Frame, Layer, LayerStack};
use crate::render::{RenderLoop, RenderSurface, RenderThread};

static LOADER: InitGuard = InitGuard::new("integration loader");

struct CountingSurface {
    swaps: Arc<Mutex<u64>>,
}

impl RenderSurface for CountingSurface {
    fn make_current(&mut self) {}

    fn load_graphics(&mut self) -> bool {
        true
    }

    fn proc_address(&mut self, _symbol: &str) -> *const c_void {
        std::ptr::null()
    }

    fn swap_buffers(&mut self) {
        *self.swaps.lock() += 1;
    }
}

#[derive(Default)]
struct CloseRecorder {
    state: InputState,
    closed: bool,
}

impl InputHandler for CloseRecorder {
    fn input_state(&mut self) -> &mut InputState {
        &mut self.state
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

struct Tag {
    name: &'static str,
    order: Arc<Mutex<Vec<&'static str>>>,
}

impl Layer for Tag {
    fn render(&self, frame: &mut Frame<'_>) {
        if frame.index() == 0 {
            self.order.lock().push(self.name);
        }
    }
}

fn wait_until(deadline: Duration, condition: impl Fn() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    condition()
}

#[test]
fn test_close_event_stops_render_thread() {
    let registry = HandlerRegistry::default();
    let running = Arc::new(AtomicBool::new(true));
    let handler = Arc::new(Mutex::new(CloseRecorder::default()));
    let id = registry.register(Arc::clone(&running), handler.clone());

    let order = Arc::new(Mutex::new(Vec::new()));
    let layers = LayerStack::new();
    for name in ["background", "scene", "overlay"] {
        layers.push(Arc::new(Tag {
            name,
            order: Arc::clone(&order),
        }));
    }

    let swaps = Arc::new(Mutex::new(0));
    let frame_delay = Duration::from_millis(5);
    let render_loop = RenderLoop::new(
        CountingSurface {
            swaps: Arc::clone(&swaps),
        },
        layers,
        Arc::clone(&running),
        (320, 240),
    )
    .without_ui()
    .with_loader_guard(&LOADER)
    .with_min_frame_delay(frame_delay);
    let thread = RenderThread::spawn("integration render", render_loop).unwrap();

    assert!(wait_until(Duration::from_secs(2), || *swaps.lock() >= 2));
    assert!(registry.dispatch(id, &WindowEvent::Close));
    assert!(!running.load(Ordering::SeqCst));
    assert!(handler.lock().closed);

    // One frame in flight plus its pacing sleep, with slack for the scheduler.
    assert!(wait_until(frame_delay * 20, || thread.is_finished()));
    let report = thread.join().unwrap();

    assert_eq!(report.frames, *swaps.lock());
    assert_eq!(*order.lock(), ["overlay", "scene", "background"]);
}

#[test]
fn test_switched_handler_receives_close() {
    let registry = HandlerRegistry::default();
    let running = Arc::new(AtomicBool::new(true));
    let first = Arc::new(Mutex::new(CloseRecorder::default()));
    let second = Arc::new(Mutex::new(CloseRecorder::default()));
    let id = registry.register(Arc::clone(&running), first.clone());

    registry.switch(id, Some(second.clone()));
    registry.dispatch(id, &WindowEvent::Close);

    assert!(!first.lock().closed);
    assert!(second.lock().closed);
    assert!(!running.load(Ordering::SeqCst));
}

//! Threaded integration of input dispatch and the render loop, plus shared
//! test helpers

mod close_stops_render_thread;

use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Records every log line, with the thread that logged it
struct CaptureLogger {
    lines: Mutex<Vec<(Option<String>, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let thread = std::thread::current().name().map(str::to_owned);
        self.lines
            .lock()
            .push((thread, format!("{} {}", record.level(), record.args())));
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    lines: parking_lot::const_mutex(Vec::new()),
};

static INSTALL: Lazy<()> = Lazy::new(|| {
    // Only one logger per process; nothing else in the test binary installs one.
    if log::set_logger(&CAPTURE).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
});

/// Start recording log output for this test binary
pub(crate) fn capture_logs() {
    Lazy::force(&INSTALL);
}

/// Lines logged by the calling thread that contain `needle`, oldest first
///
/// Tests run on threads of their own, so other tests' output is left out.
pub(crate) fn logged_lines(needle: &str) -> Vec<String> {
    let thread = std::thread::current().name().map(str::to_owned);
    CAPTURE
        .lines
        .lock()
        .iter()
        .filter(|(logged_by, line)| *logged_by == thread && line.contains(needle))
        .map(|(_, line)| line.clone())
        .collect()
}

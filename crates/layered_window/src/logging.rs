//! Logging setup
//!
//! The library logs through the `log` facade: window creation and cursor
//! toggles at info, render thread lifecycle at debug, library init failures
//! at error and every dispatched key or button at trace.

pub use log::{debug, error, info, trace, warn};

/// Initialize `env_logger` from `RUST_LOG`, defaulting to `info`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

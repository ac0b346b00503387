//! Process-wide one-shot library initialization
//!
//! GLFW, the OpenGL loader and the ImGui context are each initialized lazily
//! by the first window that needs them. A guard records the first success
//! and is never reset. A failed attempt is not recorded, so the next caller
//! retries.

use log::{debug, error};
use parking_lot::Mutex;

/// Guard for the windowing library
///
/// Records the first successful GLFW initialization only. GLFW itself may
/// be terminated and reinitialized later as window handles come and go.
pub static WINDOWING: InitGuard = InitGuard::new("windowing library");

/// Guard for the OpenGL function loader
pub static GRAPHICS_LOADER: InitGuard = InitGuard::new("graphics loader");

/// Guard for the immediate-mode UI context
pub static UI_CONTEXT: InitGuard = InitGuard::new("UI context");

/// Synchronized initialized-once flag
#[derive(Debug)]
pub struct InitGuard {
    name: &'static str,
    initialized: Mutex<bool>,
}

impl InitGuard {
    /// Create an uninitialized guard
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            initialized: parking_lot::const_mutex(false),
        }
    }

    /// Run `init` unless a previous call already succeeded
    ///
    /// The lock is held while `init` runs, so concurrent callers wait for
    /// the outcome instead of initializing twice. Returns whether the guard
    /// is initialized after the call.
    pub fn ensure_initialized(&self, init: impl FnOnce() -> bool) -> bool {
        let mut initialized = self.initialized.lock();
        if *initialized {
            return true;
        }

        *initialized = init();
        if *initialized {
            debug!("{} initialized", self.name);
        } else {
            error!("{} initialization failed", self.name);
        }
        *initialized
    }

    /// Whether a call to [`ensure_initialized`](Self::ensure_initialized) has succeeded
    pub fn is_initialized(&self) -> bool {
        *self.initialized.lock()
    }

    /// Name used in log output
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_first_success_wins() {
        let guard = InitGuard::new("test");
        let calls = AtomicUsize::new(0);

        assert!(guard.ensure_initialized(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        }));
        assert!(guard.ensure_initialized(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            false
        }));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(guard.is_initialized());
    }

    #[test]
    fn test_failure_is_retried() {
        let guard = InitGuard::new("flaky");

        assert!(!guard.ensure_initialized(|| false));
        assert!(!guard.is_initialized());
        assert!(guard.ensure_initialized(|| true));
        assert!(guard.is_initialized());
    }

    #[test]
    fn test_concurrent_callers_initialize_once() {
        static GUARD: InitGuard = InitGuard::new("concurrent");
        let calls = Arc::new(AtomicUsize::new(0));

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    GUARD.ensure_initialized(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        true
                    })
                })
            })
            .collect();

        for thread in threads {
            assert!(thread.join().unwrap());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

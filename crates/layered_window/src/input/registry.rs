//! Window identity to active handler mapping
//!
//! Every live window has one slot holding its run flag and its active
//! handler. Dispatch looks the handler up here, so a handler switch is
//! visible to the very next event.
//!
//! Hooks run with their handler locked and may call back into the registry.
//! When a handler is locked at the moment it is registered or switched in,
//! its back-reference is set on its next dispatch instead.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use glfw::WindowEvent;
use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use super::{dispatch, SharedHandler, WindowLink};

new_key_type! {
    /// Identity of a live window
    pub struct WindowId;
}

struct Slot {
    link: WindowLink,
    handler: SharedHandler,
    needs_attach: bool,
}

/// Registry of active handlers keyed by window
#[derive(Default)]
pub struct HandlerRegistry {
    slots: Mutex<SlotMap<WindowId, Slot>>,
}

static GLOBAL: Lazy<HandlerRegistry> = Lazy::new(HandlerRegistry::default);

impl HandlerRegistry {
    /// The registry shared by every window in the process
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Add a window with its initial handler
    ///
    /// The handler's back-reference is pointed at the new window.
    pub fn register(&self, running: Arc<AtomicBool>, handler: SharedHandler) -> WindowId {
        let mut slots = self.slots.lock();
        slots.insert_with_key(|id| {
            let link = WindowLink::new(id, running);
            let needs_attach = !try_attach(&handler, &link);
            Slot {
                link,
                handler,
                needs_attach,
            }
        })
    }

    /// Remove a window, returning its last active handler
    pub fn unregister(&self, id: WindowId) -> Option<SharedHandler> {
        self.slots.lock().remove(id).map(|slot| slot.handler)
    }

    /// Make `handler` the active handler of window `id`
    ///
    /// `None` is a no-op returning `None`. Otherwise the new handler's
    /// back-reference is set to the window and the previously active handler
    /// is returned. Safe to call from inside a hook, including with the
    /// handler whose hook is running.
    pub fn switch(&self, id: WindowId, handler: Option<SharedHandler>) -> Option<SharedHandler> {
        let handler = handler?;
        let mut slots = self.slots.lock();
        let slot = slots.get_mut(id)?;

        slot.needs_attach = !try_attach(&handler, &slot.link);
        debug!("switched input handler for window {:?}", id);
        Some(std::mem::replace(&mut slot.handler, handler))
    }

    /// The active handler of window `id`
    pub fn active(&self, id: WindowId) -> Option<SharedHandler> {
        self.slots.lock().get(id).map(|slot| Arc::clone(&slot.handler))
    }

    /// Back-reference for window `id`
    pub fn link(&self, id: WindowId) -> Option<WindowLink> {
        self.slots.lock().get(id).map(|slot| slot.link.clone())
    }

    /// Deliver `event` to the active handler of window `id`
    ///
    /// The registry lock is released before the handler runs, so hooks may
    /// switch handlers themselves. Returns whether a hook was invoked.
    pub fn dispatch(&self, id: WindowId, event: &WindowEvent) -> bool {
        let Some((link, handler, needs_attach)) = self.slots.lock().get_mut(id).map(|slot| {
            let needs_attach = std::mem::take(&mut slot.needs_attach);
            (slot.link.clone(), Arc::clone(&slot.handler), needs_attach)
        }) else {
            return false;
        };

        let mut handler = handler.lock();
        if needs_attach {
            handler.input_state().attach(link.clone());
        }
        dispatch(&mut *handler, &link, event)
    }

    /// Number of registered windows
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Whether no window is registered
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

/// Point `handler` at `link` unless it is locked, returning whether it was
fn try_attach(handler: &SharedHandler, link: &WindowLink) -> bool {
    handler
        .try_lock()
        .map(|mut handler| handler.input_state().attach(link.clone()))
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputHandler, InputState};
    use glfw::{Action, Key, Modifiers};

    #[derive(Default)]
    struct Counter {
        state: InputState,
        keys: usize,
    }

    impl InputHandler for Counter {
        fn input_state(&mut self) -> &mut InputState {
            &mut self.state
        }

        fn key_state_update(&mut self, _key: Key, _pressed: bool) {
            self.keys += 1;
        }
    }

    /// Switches to `target` from inside its key hook
    struct Switcher {
        state: InputState,
        registry: Arc<HandlerRegistry>,
        target: Option<SharedHandler>,
        keys: usize,
    }

    impl Switcher {
        fn new(registry: &Arc<HandlerRegistry>) -> Self {
            Self {
                state: InputState::default(),
                registry: Arc::clone(registry),
                target: None,
                keys: 0,
            }
        }
    }

    impl InputHandler for Switcher {
        fn input_state(&mut self) -> &mut InputState {
            &mut self.state
        }

        fn key_state_update(&mut self, _key: Key, _pressed: bool) {
            self.keys += 1;
            let id = self.state.window().map(WindowLink::id);
            if let (Some(id), Some(target)) = (id, self.target.take()) {
                self.registry.switch(id, Some(target));
            }
        }
    }

    fn press() -> WindowEvent {
        WindowEvent::Key(Key::Space, 0, Action::Press, Modifiers::empty())
    }

    #[test]
    fn test_register_sets_back_reference() {
        let registry = HandlerRegistry::default();
        let handler = Arc::new(Mutex::new(Counter::default()));

        let id = registry.register(Arc::new(AtomicBool::new(true)), handler.clone());

        assert_eq!(handler.lock().state.window().map(WindowLink::id), Some(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_switch_returns_previous_and_redirects_events() {
        let registry = HandlerRegistry::default();
        let a = Arc::new(Mutex::new(Counter::default()));
        let b = Arc::new(Mutex::new(Counter::default()));
        let id = registry.register(Arc::new(AtomicBool::new(true)), a.clone());

        let previous = registry.switch(id, Some(b.clone())).unwrap();
        let a_dyn: SharedHandler = a.clone();
        assert!(Arc::ptr_eq(&previous, &a_dyn));

        assert!(registry.dispatch(id, &press()));
        assert_eq!(a.lock().keys, 0);
        assert_eq!(b.lock().keys, 1);
        assert_eq!(b.lock().state.window().map(WindowLink::id), Some(id));
    }

    #[test]
    fn test_switch_to_none_is_noop() {
        let registry = HandlerRegistry::default();
        let a = Arc::new(Mutex::new(Counter::default()));
        let id = registry.register(Arc::new(AtomicBool::new(true)), a.clone());

        assert!(registry.switch(id, None).is_none());

        registry.dispatch(id, &press());
        assert_eq!(a.lock().keys, 1);
    }

    #[test]
    fn test_dispatch_after_unregister() {
        let registry = HandlerRegistry::default();
        let a = Arc::new(Mutex::new(Counter::default()));
        let id = registry.register(Arc::new(AtomicBool::new(true)), a.clone());

        assert!(registry.unregister(id).is_some());
        assert!(!registry.dispatch(id, &press()));
        assert!(registry.is_empty());
        assert_eq!(a.lock().keys, 0);
    }

    #[test]
    fn test_close_event_stops_registered_window() {
        let registry = HandlerRegistry::default();
        let running = Arc::new(AtomicBool::new(true));
        let id = registry.register(Arc::clone(&running), Arc::new(Mutex::new(Counter::default())));

        registry.dispatch(id, &WindowEvent::Close);

        assert!(!running.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_hook_switches_to_its_own_handler() {
        let registry = Arc::new(HandlerRegistry::default());
        let handler = Arc::new(Mutex::new(Switcher::new(&registry)));
        let shared: SharedHandler = handler.clone();
        handler.lock().target = Some(Arc::clone(&shared));
        let id = registry.register(Arc::new(AtomicBool::new(true)), shared.clone());

        assert!(registry.dispatch(id, &press()));
        assert!(Arc::ptr_eq(&registry.active(id).unwrap(), &shared));

        assert!(registry.dispatch(id, &press()));
        assert_eq!(handler.lock().keys, 2);
        assert_eq!(handler.lock().state.window().map(WindowLink::id), Some(id));
    }

    #[test]
    fn test_hook_switches_to_another_handler() {
        let registry = Arc::new(HandlerRegistry::default());
        let first = Arc::new(Mutex::new(Switcher::new(&registry)));
        let second = Arc::new(Mutex::new(Counter::default()));
        first.lock().target = Some(second.clone());
        let id = registry.register(Arc::new(AtomicBool::new(true)), first.clone());

        registry.dispatch(id, &press());
        assert_eq!(second.lock().state.window().map(WindowLink::id), Some(id));

        registry.dispatch(id, &press());
        assert_eq!(first.lock().keys, 1);
        assert_eq!(second.lock().keys, 1);
    }

    #[test]
    fn test_locked_handler_is_attached_on_next_dispatch() {
        let registry = HandlerRegistry::default();
        let a = Arc::new(Mutex::new(Counter::default()));
        let b = Arc::new(Mutex::new(Counter::default()));
        let id = registry.register(Arc::new(AtomicBool::new(true)), a);

        {
            let _held = b.lock();
            registry.switch(id, Some(b.clone()));
        }
        assert!(b.lock().state.window().is_none());

        registry.dispatch(id, &press());
        assert_eq!(b.lock().state.window().map(WindowLink::id), Some(id));
        assert_eq!(b.lock().keys, 1);
    }
}

//! Translation of native window events into handler hooks
//!
//! The hook called is decided by the event type alone; what the hook does
//! is up to the handler.

use glfw::{Action, WindowEvent};
use log::trace;

use super::{InputHandler, WindowLink};

/// Deliver one native event to `handler`
///
/// `link` identifies the window the event belongs to; a close request
/// clears its run flag before the handler's `close` hook runs. Returns
/// whether a hook was invoked.
pub fn dispatch(handler: &mut dyn InputHandler, link: &WindowLink, event: &WindowEvent) -> bool {
    match *event {
        WindowEvent::CursorPos(x, y) => {
            let state = handler.input_state();
            state.cursor_dx = x - state.cursor_x;
            state.cursor_dy = y - state.cursor_y;
            state.cursor_x = x;
            state.cursor_y = y;
            handler.cursor_update();
        }
        WindowEvent::Key(key, _scancode, action, _mods) => {
            if action == Action::Repeat {
                return false;
            }
            trace!("key {:?} {:?}", key, action);
            handler.key_state_update(key, action == Action::Press);
        }
        WindowEvent::MouseButton(button, action, _mods) => {
            trace!("mouse button {:?} {:?}", button, action);
            handler.mouse_button_update(button, action == Action::Press);
        }
        WindowEvent::Scroll(dx, dy) => {
            let state = handler.input_state();
            state.scroll_dx = dx;
            state.scroll_dy = dy;
            state.scroll_x += dx;
            state.scroll_y += dy;
            handler.scroll_update();
        }
        WindowEvent::Size(width, height) => {
            let state = handler.input_state();
            state.width = width;
            state.height = height;
            handler.resized();
        }
        WindowEvent::Close => {
            link.request_close();
            handler.close();
        }
        WindowEvent::FileDrop(ref paths) => {
            for path in paths {
                handler.drop_input(path);
            }
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputState, WindowId};
    use glfw::{Key, Modifiers, MouseButton};
    use std::path::{Path, PathBuf};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        state: InputState,
        calls: Vec<String>,
    }

    impl InputHandler for Recorder {
        fn input_state(&mut self) -> &mut InputState {
            &mut self.state
        }

        fn cursor_update(&mut self) {
            self.calls.push("cursor".into());
        }

        fn key_state_update(&mut self, key: Key, pressed: bool) {
            self.calls.push(format!("key {key:?} {pressed}"));
        }

        fn mouse_button_update(&mut self, button: MouseButton, pressed: bool) {
            self.calls.push(format!("mouse {button:?} {pressed}"));
        }

        fn scroll_update(&mut self) {
            self.calls.push("scroll".into());
        }

        fn resized(&mut self) {
            self.calls.push("resized".into());
        }

        fn close(&mut self) {
            self.calls.push("close".into());
        }

        fn drop_input(&mut self, path: &Path) {
            self.calls.push(format!("drop {}", path.display()));
        }
    }

    fn link() -> WindowLink {
        WindowLink::new(WindowId::default(), Arc::new(AtomicBool::new(true)))
    }

    #[test]
    fn test_cursor_delta_tracks_previous_position() {
        let mut handler = Recorder::default();
        let link = link();

        dispatch(&mut handler, &link, &WindowEvent::CursorPos(10.0, 20.0));
        dispatch(&mut handler, &link, &WindowEvent::CursorPos(15.0, 12.0));

        assert_eq!((handler.state.cursor_x, handler.state.cursor_y), (15.0, 12.0));
        assert_eq!((handler.state.cursor_dx, handler.state.cursor_dy), (5.0, -8.0));
        assert_eq!(handler.calls, ["cursor", "cursor"]);
    }

    #[test]
    fn test_key_repeat_is_ignored() {
        let mut handler = Recorder::default();
        let link = link();

        assert!(!dispatch(
            &mut handler,
            &link,
            &WindowEvent::Key(Key::A, 0, Action::Repeat, Modifiers::empty())
        ));
        assert!(handler.calls.is_empty());

        dispatch(&mut handler, &link, &WindowEvent::Key(Key::A, 0, Action::Press, Modifiers::empty()));
        dispatch(&mut handler, &link, &WindowEvent::Key(Key::A, 0, Action::Release, Modifiers::empty()));
        assert_eq!(handler.calls, ["key A true", "key A false"]);
    }

    #[test]
    fn test_mouse_button() {
        let mut handler = Recorder::default();
        dispatch(
            &mut handler,
            &link(),
            &WindowEvent::MouseButton(MouseButton::Button2, Action::Press, Modifiers::empty()),
        );
        assert_eq!(handler.calls, ["mouse Button2 true"]);
    }

    #[test]
    fn test_scroll_accumulates() {
        let mut handler = Recorder::default();
        let link = link();

        dispatch(&mut handler, &link, &WindowEvent::Scroll(1.0, -2.0));
        dispatch(&mut handler, &link, &WindowEvent::Scroll(0.5, -1.0));

        assert_eq!((handler.state.scroll_dx, handler.state.scroll_dy), (0.5, -1.0));
        assert_eq!((handler.state.scroll_x, handler.state.scroll_y), (1.5, -3.0));
        assert_eq!(handler.calls, ["scroll", "scroll"]);
    }

    #[test]
    fn test_resize_updates_size() {
        let mut handler = Recorder::default();
        dispatch(&mut handler, &link(), &WindowEvent::Size(1280, 720));
        assert_eq!((handler.state.width, handler.state.height), (1280, 720));
        assert_eq!(handler.calls, ["resized"]);
    }

    #[test]
    fn test_close_clears_run_flag() {
        let mut handler = Recorder::default();
        let link = link();

        dispatch(&mut handler, &link, &WindowEvent::Close);

        assert!(!link.is_running());
        assert_eq!(handler.calls, ["close"]);
    }

    #[test]
    fn test_file_drop_in_order() {
        let mut handler = Recorder::default();
        let paths = vec![PathBuf::from("a.png"), PathBuf::from("b.obj"), PathBuf::from("c.txt")];

        dispatch(&mut handler, &link(), &WindowEvent::FileDrop(paths));

        assert_eq!(handler.calls, ["drop a.png", "drop b.obj", "drop c.txt"]);
    }

    #[test]
    fn test_unhandled_event() {
        let mut handler = Recorder::default();
        assert!(!dispatch(&mut handler, &link(), &WindowEvent::Focus(true)));
        assert!(handler.calls.is_empty());
    }
}

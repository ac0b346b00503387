//! Window input forwarded to the UI context
//!
//! Input handlers run on the event thread while the ImGui context lives on
//! the render thread. Events are translated here and sent over a channel.

use glfw::{Action, Modifiers, WindowEvent};
use imgui::{Io, Key, MouseButton};

/// Input the UI context cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Cursor moved to a position in screen coordinates
    CursorPos([f32; 2]),
    /// Mouse button pressed or released
    MouseButton(MouseButton, bool),
    /// Wheel or trackpad scroll delta
    Scroll([f32; 2]),
    /// Key pressed or released
    Key(Key, bool),
    /// Window resized to a size in screen coordinates
    Resize([f32; 2]),
}

impl UiEvent {
    /// Translate a window event, returning nothing for events the UI ignores
    ///
    /// Key events also report the state of every modifier, which ImGui
    /// tracks as separate keys.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_window_event(event: &WindowEvent) -> Vec<Self> {
        match *event {
            WindowEvent::CursorPos(x, y) => vec![Self::CursorPos([x as f32, y as f32])],
            WindowEvent::MouseButton(button, action, _) => mouse_button(button)
                .map(|button| Self::MouseButton(button, action != Action::Release))
                .into_iter()
                .collect(),
            WindowEvent::Scroll(dx, dy) => vec![Self::Scroll([dx as f32, dy as f32])],
            WindowEvent::Size(width, height) => {
                vec![Self::Resize([width.max(0) as f32, height.max(0) as f32])]
            }
            WindowEvent::Key(key, _, action, mods) => {
                let mut events = modifier_events(mods);
                if let Some(key) = key_from_glfw(key) {
                    events.push(Self::Key(key, action != Action::Release));
                }
                events
            }
            _ => Vec::new(),
        }
    }

    /// Queue this event on the UI input queue
    pub fn apply(self, io: &mut Io) {
        match self {
            Self::CursorPos(pos) => io.add_mouse_pos_event(pos),
            Self::MouseButton(button, down) => io.add_mouse_button_event(button, down),
            Self::Scroll(wheel) => io.add_mouse_wheel_event(wheel),
            Self::Key(key, down) => io.add_key_event(key, down),
            Self::Resize(size) => io.display_size = size,
        }
    }
}

fn modifier_events(mods: Modifiers) -> Vec<UiEvent> {
    vec![
        UiEvent::Key(Key::ModCtrl, mods.contains(Modifiers::Control)),
        UiEvent::Key(Key::ModShift, mods.contains(Modifiers::Shift)),
        UiEvent::Key(Key::ModAlt, mods.contains(Modifiers::Alt)),
        UiEvent::Key(Key::ModSuper, mods.contains(Modifiers::Super)),
    ]
}

const fn mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        glfw::MouseButton::Button4 => Some(MouseButton::Extra1),
        glfw::MouseButton::Button5 => Some(MouseButton::Extra2),
        _ => None,
    }
}

#[allow(clippy::too_many_lines)]
const fn key_from_glfw(key: glfw::Key) -> Option<Key> {
    use glfw::Key as G;

    Some(match key {
        G::Tab => Key::Tab,
        G::Left => Key::LeftArrow,
        G::Right => Key::RightArrow,
        G::Up => Key::UpArrow,
        G::Down => Key::DownArrow,
        G::PageUp => Key::PageUp,
        G::PageDown => Key::PageDown,
        G::Home => Key::Home,
        G::End => Key::End,
        G::Insert => Key::Insert,
        G::Delete => Key::Delete,
        G::Backspace => Key::Backspace,
        G::Space => Key::Space,
        G::Enter => Key::Enter,
        G::Escape => Key::Escape,
        G::LeftControl => Key::LeftCtrl,
        G::LeftShift => Key::LeftShift,
        G::LeftAlt => Key::LeftAlt,
        G::LeftSuper => Key::LeftSuper,
        G::RightControl => Key::RightCtrl,
        G::RightShift => Key::RightShift,
        G::RightAlt => Key::RightAlt,
        G::RightSuper => Key::RightSuper,
        G::Menu => Key::Menu,
        G::Num0 => Key::Alpha0,
        G::Num1 => Key::Alpha1,
        G::Num2 => Key::Alpha2,
        G::Num3 => Key::Alpha3,
        G::Num4 => Key::Alpha4,
        G::Num5 => Key::Alpha5,
        G::Num6 => Key::Alpha6,
        G::Num7 => Key::Alpha7,
        G::Num8 => Key::Alpha8,
        G::Num9 => Key::Alpha9,
        G::A => Key::A,
        G::B => Key::B,
        G::C => Key::C,
        G::D => Key::D,
        G::E => Key::E,
        G::F => Key::F,
        G::G => Key::G,
        G::H => Key::H,
        G::I => Key::I,
        G::J => Key::J,
        G::K => Key::K,
        G::L => Key::L,
        G::M => Key::M,
        G::N => Key::N,
        G::O => Key::O,
        G::P => Key::P,
        G::Q => Key::Q,
        G::R => Key::R,
        G::S => Key::S,
        G::T => Key::T,
        G::U => Key::U,
        G::V => Key::V,
        G::W => Key::W,
        G::X => Key::X,
        G::Y => Key::Y,
        G::Z => Key::Z,
        G::F1 => Key::F1,
        G::F2 => Key::F2,
        G::F3 => Key::F3,
        G::F4 => Key::F4,
        G::F5 => Key::F5,
        G::F6 => Key::F6,
        G::F7 => Key::F7,
        G::F8 => Key::F8,
        G::F9 => Key::F9,
        G::F10 => Key::F10,
        G::F11 => Key::F11,
        G::F12 => Key::F12,
        G::Apostrophe => Key::Apostrophe,
        G::Comma => Key::Comma,
        G::Minus => Key::Minus,
        G::Period => Key::Period,
        G::Slash => Key::Slash,
        G::Semicolon => Key::Semicolon,
        G::Equal => Key::Equal,
        G::LeftBracket => Key::LeftBracket,
        G::Backslash => Key::Backslash,
        G::RightBracket => Key::RightBracket,
        G::GraveAccent => Key::GraveAccent,
        G::CapsLock => Key::CapsLock,
        G::ScrollLock => Key::ScrollLock,
        G::NumLock => Key::NumLock,
        G::PrintScreen => Key::PrintScreen,
        G::Pause => Key::Pause,
        G::Kp0 => Key::Keypad0,
        G::Kp1 => Key::Keypad1,
        G::Kp2 => Key::Keypad2,
        G::Kp3 => Key::Keypad3,
        G::Kp4 => Key::Keypad4,
        G::Kp5 => Key::Keypad5,
        G::Kp6 => Key::Keypad6,
        G::Kp7 => Key::Keypad7,
        G::Kp8 => Key::Keypad8,
        G::Kp9 => Key::Keypad9,
        G::KpDecimal => Key::KeypadDecimal,
        G::KpDivide => Key::KeypadDivide,
        G::KpMultiply => Key::KeypadMultiply,
        G::KpSubtract => Key::KeypadSubtract,
        G::KpAdd => Key::KeypadAdd,
        G::KpEnter => Key::KeypadEnter,
        G::KpEqual => Key::KeypadEqual,
        _ => return None,
    })
}

use winit::event::{
    ElementState, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent,
};

use crate::screen::Position;

/// A key the explorer reacts to, independent of the windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    F11,
    Equals,
    Minus,
    NumpadAdd,
    NumpadSubtract,
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Exit,
    ToggleFullscreen,
    IncreaseIterations,
    DecreaseIterations,
}

impl Key {
    pub const COUNT: usize = 6;

    pub fn from_virtual_keycode(code: VirtualKeyCode) -> Option<Self> {
        match code {
            VirtualKeyCode::Escape => Some(Key::Escape),
            VirtualKeyCode::F11 => Some(Key::F11),
            VirtualKeyCode::Equals => Some(Key::Equals),
            VirtualKeyCode::Minus => Some(Key::Minus),
            VirtualKeyCode::NumpadAdd => Some(Key::NumpadAdd),
            VirtualKeyCode::NumpadSubtract => Some(Key::NumpadSubtract),
            _ => None,
        }
    }

    pub fn action(self) -> Action {
        match self {
            Key::Escape => Action::Exit,
            Key::F11 => Action::ToggleFullscreen,
            Key::Equals | Key::NumpadAdd => Action::IncreaseIterations,
            Key::Minus | Key::NumpadSubtract => Action::DecreaseIterations,
        }
    }

    /// Dense index in `0..Key::COUNT`, for per-key state tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl From<ElementState> for ButtonState {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => ButtonState::Pressed,
            ElementState::Released => ButtonState::Released,
        }
    }
}

/// Input delivered to the interaction controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Vertical wheel movement; positive is away from the user.
    Scroll { dy: f64 },
    PrimaryButton(ButtonState),
    CursorMoved(Position),
    Key { key: Key, state: ButtonState },
}

impl InputEvent {
    /// Translate a window event, dropping everything the explorer doesn't use.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::MouseWheel { delta, .. } => Some(Self::from_scroll(*delta)),
            WindowEvent::MouseInput { state, button, .. } => Self::from_button(*button, *state),
            WindowEvent::CursorMoved { position, .. } => {
                Some(InputEvent::CursorMoved((*position).into()))
            }
            WindowEvent::KeyboardInput { input, .. } => Self::from_keyboard(input),
            _ => None,
        }
    }

    /// Every wheel event becomes a scroll, including purely horizontal ones with `dy == 0`.
    pub fn from_scroll(delta: MouseScrollDelta) -> Self {
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(position) => position.y,
        };
        InputEvent::Scroll { dy }
    }

    pub fn from_button(button: MouseButton, state: ElementState) -> Option<Self> {
        match button {
            MouseButton::Left => Some(InputEvent::PrimaryButton(state.into())),
            _ => None,
        }
    }

    pub fn from_keyboard(input: &KeyboardInput) -> Option<Self> {
        let key = Key::from_virtual_keycode(input.virtual_keycode?)?;
        Some(InputEvent::Key {
            key,
            state: input.state.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;

    use super::*;

    #[test]
    fn bound_keys() {
        let cases = [
            (VirtualKeyCode::Escape, Action::Exit),
            (VirtualKeyCode::F11, Action::ToggleFullscreen),
            (VirtualKeyCode::Equals, Action::IncreaseIterations),
            (VirtualKeyCode::NumpadAdd, Action::IncreaseIterations),
            (VirtualKeyCode::Minus, Action::DecreaseIterations),
            (VirtualKeyCode::NumpadSubtract, Action::DecreaseIterations),
        ];
        for (code, action) in cases {
            assert_eq!(Key::from_virtual_keycode(code).map(Key::action), Some(action));
        }
    }

    #[test]
    fn unbound_keys_are_ignored() {
        for code in [VirtualKeyCode::A, VirtualKeyCode::Space, VirtualKeyCode::F10] {
            assert_eq!(Key::from_virtual_keycode(code), None);
        }
    }

    #[test]
    fn key_indices_are_dense_and_distinct() {
        let keys = [
            Key::Escape,
            Key::F11,
            Key::Equals,
            Key::Minus,
            Key::NumpadAdd,
            Key::NumpadSubtract,
        ];
        let mut seen = [false; Key::COUNT];
        for key in keys {
            assert!(!seen[key.index()], "{:?} shares an index", key);
            seen[key.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn wheel_lines_keep_their_sign() {
        assert_eq!(
            InputEvent::from_scroll(MouseScrollDelta::LineDelta(0.0, 1.0)),
            InputEvent::Scroll { dy: 1.0 }
        );
        assert_eq!(
            InputEvent::from_scroll(MouseScrollDelta::LineDelta(0.0, -3.0)),
            InputEvent::Scroll { dy: -3.0 }
        );
    }

    #[test]
    fn wheel_pixels_use_vertical_component() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(-40.0, 12.5));
        assert_eq!(InputEvent::from_scroll(delta), InputEvent::Scroll { dy: 12.5 });
    }

    #[test]
    fn horizontal_scroll_still_scrolls() {
        assert_eq!(
            InputEvent::from_scroll(MouseScrollDelta::LineDelta(1.0, 0.0)),
            InputEvent::Scroll { dy: 0.0 }
        );
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(25.0, 0.0));
        assert_eq!(InputEvent::from_scroll(delta), InputEvent::Scroll { dy: 0.0 });
    }

    #[test]
    fn primary_button_translates() {
        assert_eq!(
            InputEvent::from_button(MouseButton::Left, ElementState::Pressed),
            Some(InputEvent::PrimaryButton(ButtonState::Pressed))
        );
        assert_eq!(
            InputEvent::from_button(MouseButton::Left, ElementState::Released),
            Some(InputEvent::PrimaryButton(ButtonState::Released))
        );
    }

    #[test]
    fn other_buttons_are_ignored() {
        for button in [MouseButton::Right, MouseButton::Middle, MouseButton::Other(4)] {
            assert_eq!(InputEvent::from_button(button, ElementState::Pressed), None);
        }
    }

    #[allow(deprecated)]
    fn keyboard(code: Option<VirtualKeyCode>, state: ElementState) -> KeyboardInput {
        KeyboardInput {
            scancode: 0,
            state,
            virtual_keycode: code,
            modifiers: Default::default(),
        }
    }

    #[test]
    fn keyboard_input_translates() {
        assert_eq!(
            InputEvent::from_keyboard(&keyboard(Some(VirtualKeyCode::F11), ElementState::Pressed)),
            Some(InputEvent::Key {
                key: Key::F11,
                state: ButtonState::Pressed,
            })
        );
        assert_eq!(
            InputEvent::from_keyboard(&keyboard(Some(VirtualKeyCode::Minus), ElementState::Released)),
            Some(InputEvent::Key {
                key: Key::Minus,
                state: ButtonState::Released,
            })
        );
        assert_eq!(
            InputEvent::from_keyboard(&keyboard(Some(VirtualKeyCode::Q), ElementState::Pressed)),
            None
        );
        assert_eq!(
            InputEvent::from_keyboard(&keyboard(None, ElementState::Pressed)),
            None
        );
    }
}

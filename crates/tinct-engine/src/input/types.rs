/// Keyboard key identifier.
///
/// Only the keys the studio binds get a variant. Everything else maps to
/// `Key::Other` with the platform code, or 0 when there is none.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Backspace,
    Space,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Other(u32),
}

/// Press or release, shared by keys and mouse buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Pointer button event. `x`/`y` are physical pixels from the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: ButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: ButtonState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    /// Pointer position in physical pixels.
    PointerMoved { x: f32, y: f32 },
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton, PointerButtonEvent};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys, pointer position).
/// `InputFrame` collects what changed since the last frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame. Repeats are not counted.
    pub keys_pressed: HashSet<Key>,

    /// Button presses this frame, in arrival order, with their positions.
    pub clicks: Vec<PointerButtonEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.clicks.clear();
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Presses of `button` this frame, oldest first.
    pub fn clicks_of(&self, button: MouseButton) -> impl Iterator<Item = &PointerButtonEvent> {
        self.clicks.iter().filter(move |c| c.button == button)
    }
}

use std::collections::HashSet;

use glam::Vec2;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, MouseButton, PointerButtonEvent};

/// Current input state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` to the held state and records the transition in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are lost while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                ButtonState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(button_ev) => {
                let PointerButtonEvent { button, state, x, y } = *button_ev;
                self.pointer_pos = Some((x, y));

                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(button) {
                            frame.clicks.push(*button_ev);
                        }
                    }
                    ButtonState::Released => {
                        self.buttons_down.remove(&button);
                    }
                }
            }
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Pointer position in clip space for a `width` x `height` surface.
    pub fn pointer_clip(&self, width: u32, height: u32) -> Option<Vec2> {
        let (x, y) = self.pointer_pos?;
        pixel_to_clip(x, y, width, height)
    }
}

/// Maps a physical pixel position (origin top-left, y down) to clip space
/// (origin center, y up). `None` for an empty surface.
pub fn pixel_to_clip(x: f32, y: f32, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    let nx = x / width as f32 * 2.0 - 1.0;
    let ny = 1.0 - y / height as f32 * 2.0;
    Some(Vec2::new(nx, ny))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: ButtonState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    fn click(x: f32, y: f32, state: ButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
        })
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn held_key_counts_as_one_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Digit2, ButtonState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Digit2, ButtonState::Pressed, true));

        assert!(frame.pressed(Key::Digit2));
        assert_eq!(frame.keys_pressed.len(), 1);
        assert_eq!(frame.events.len(), 2);
        assert!(state.key_down(Key::Digit2));
    }

    #[test]
    fn release_allows_the_next_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Backspace, ButtonState::Pressed, false));
        frame.clear();
        state.apply_event(&mut frame, key(Key::Backspace, ButtonState::Released, false));
        assert!(!frame.pressed(Key::Backspace));

        state.apply_event(&mut frame, key(Key::Backspace, ButtonState::Pressed, false));
        assert!(frame.pressed(Key::Backspace));
    }

    #[test]
    fn focus_loss_drops_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Space, ButtonState::Pressed, false));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.key_down(Key::Space));
        assert!(!state.focused);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn clicks_are_recorded_in_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, click(1.0, 2.0, ButtonState::Pressed));
        state.apply_event(&mut frame, click(1.0, 2.0, ButtonState::Released));
        state.apply_event(&mut frame, click(5.0, 6.0, ButtonState::Pressed));

        let positions: Vec<_> = frame.clicks_of(MouseButton::Left).map(|c| (c.x, c.y)).collect();
        assert_eq!(positions, vec![(1.0, 2.0), (5.0, 6.0)]);
        assert_eq!(frame.clicks_of(MouseButton::Right).count(), 0);
        assert_eq!(state.pointer_pos, Some((5.0, 6.0)));
    }

    #[test]
    fn pointer_left_clears_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        assert_eq!(state.pointer_pos, Some((3.0, 4.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_clip(10, 10), None);
    }

    #[test]
    fn pixel_corners_map_to_clip_corners() {
        assert_eq!(pixel_to_clip(0.0, 0.0, 200, 100), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pixel_to_clip(200.0, 100.0, 200, 100), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pixel_to_clip(100.0, 50.0, 200, 100), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(pixel_to_clip(1.0, 1.0, 0, 100), None);
    }
}

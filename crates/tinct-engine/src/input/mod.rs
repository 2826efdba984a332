//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into [`InputEvent`]s through
//! `platform::winit` and feeds them to the window's [`InputState`].

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::{pixel_to_clip, InputState};
pub use types::{ButtonState, InputEvent, Key, MouseButton, PointerButtonEvent};

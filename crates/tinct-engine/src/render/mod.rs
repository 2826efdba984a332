//! Per-frame compositor.
//!
//! The [`TextureRenderer`] owns a fixed full-screen-quad pipeline and samples
//! whatever [`crate::texture::TextureSource`] is currently active. Drivers swap
//! the active source through a [`SourceHandle`] from any thread; the draw loop
//! picks up the newest one at the start of each frame.

mod config;
mod ctx;
mod renderer;
mod slot;

pub use config::RendererConfig;
pub use ctx::RenderTarget;
pub use renderer::{FrameOutcome, SourceHandle, TextureRenderer};
pub use slot::{LatestHandle, LatestSlot};

use thiserror::Error;

/// Per-call failure of [`super::TextureSource::texture`].
///
/// These are recoverable: the renderer skips sampling for the frame and keeps
/// showing the last good image.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum TextureError {
    #[error("cannot allocate a {width}x{height} texture: both sides must be non-zero")]
    EmptyExtent { width: u32, height: u32 },

    #[error("cannot allocate a {width}x{height} texture: device limit is {max} per side")]
    ExceedsLimit { width: u32, height: u32, max: u32 },
}

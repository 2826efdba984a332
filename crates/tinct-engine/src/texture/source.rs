use std::sync::Arc;

use super::TextureError;

/// Capability to produce a 2D image of a requested size.
///
/// Implementations must be referentially transparent: the same `(width, height)`
/// always yields the same pixels, although every call may allocate a new texture.
/// The returned texture is in [`crate::paint::PIXEL_FORMAT`] and carries at least
/// `TEXTURE_BINDING | COPY_SRC` usage.
pub trait TextureSource: Send + Sync {
    fn texture(&self, width: u32, height: u32) -> Result<wgpu::Texture, TextureError>;

    /// Short human-readable name used in logs.
    fn label(&self) -> &str {
        "texture source"
    }
}

/// A source shared between a driver and the renderer.
///
/// Sources are replaced whole, never mutated, so handing out `Arc`s is enough to
/// keep readers from observing half-updated state.
pub type SharedSource = Arc<dyn TextureSource>;

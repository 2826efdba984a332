//! Texture sources: "produce an image of this size, or fail".
//!
//! A source is immutable after construction. Calling [`TextureSource::texture`]
//! twice with the same size yields pixel-identical images, each in a freshly
//! allocated GPU texture in [`crate::paint::PIXEL_FORMAT`].
//!
//! CPU-filled sources live here. Rasterized sources are produced by the
//! factories in [`crate::pipeline`].

mod banded;
mod error;
mod readback;
mod solid;
mod source;
pub(crate) mod target;

pub use banded::{band_spans, BandedColorSource};
pub use error::TextureError;
pub use readback::read_pixels;
pub use solid::SolidColorSource;
pub use source::{SharedSource, TextureSource};

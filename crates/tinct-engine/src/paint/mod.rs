//! Color model and the surface pixel codec.
//!
//! Scope:
//! - straight-alpha normalized color (`Color`)
//! - packing into the 32-bit BGRA layout every texture in the engine uses

pub mod color;
pub mod pixel;

pub use color::Color;
pub use pixel::{pack, PackedPixel, PIXEL_FORMAT};

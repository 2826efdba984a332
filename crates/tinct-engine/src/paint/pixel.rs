//! Pixel codec for the engine-wide surface format.
//!
//! Every texture, render target and swapchain image uses [`PIXEL_FORMAT`]. The
//! packed layout below is what ends up in memory for that format, so changing one
//! without the other corrupts every color silently.

use super::Color;

/// The one pixel format used by all sources, pipelines and the presenting surface.
pub const PIXEL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

/// A 32-bit pixel in `Bgra8Unorm` order.
///
/// Bit layout of the `u32`: blue in bits 0..8, green 8..16, red 16..24,
/// alpha 24..32. Stored little-endian this gives the byte order `[B, G, R, A]`.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PackedPixel(pub u32);

impl PackedPixel {
    /// Fully transparent black, the content of a cleared render target.
    pub const TRANSPARENT: Self = Self(0);

    /// Creates a pixel from bytes in memory order (`[B, G, R, A]`).
    #[inline]
    pub const fn from_bgra_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// Bytes in memory order (`[B, G, R, A]`).
    #[inline]
    pub const fn to_bgra_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl std::fmt::Display for PackedPixel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Converts a color to its packed surface representation.
///
/// Each channel is scaled by 255 and truncated toward zero. There is no clamping:
/// a channel above 1.0 produces a value wider than 8 bits that spills into the
/// next channel, and a negative channel sets the high bits of the whole pixel.
/// Callers that need a safe result must validate their colors first.
pub fn pack(color: Color) -> PackedPixel {
    let channel = |v: f32| (v * 255.0) as i32;

    let packed = channel(color.b)
        | channel(color.g) << 8
        | channel(color.r) << 16
        | channel(color.a) << 24;

    PackedPixel(packed as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ─────────────────────────────────────────────────────────────

    #[test]
    fn opaque_red_has_red_and_alpha_high() {
        let p = pack(Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(p, PackedPixel(0xFFFF_0000));
        assert_eq!(p.to_bgra_bytes(), [0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn channels_land_in_bgra_order() {
        let p = pack(Color::new(0.2, 0.6, 1.0, 0.0));
        assert_eq!(p.b(), 255);
        assert_eq!(p.g(), 153);
        assert_eq!(p.r(), 51);
        assert_eq!(p.a(), 0);
    }

    #[test]
    fn transparent_packs_to_zero() {
        assert_eq!(pack(Color::transparent()), PackedPixel::TRANSPARENT);
    }

    #[test]
    fn bytes_round_trip() {
        let p = PackedPixel::from_bgra_bytes([1, 2, 3, 4]);
        assert_eq!((p.b(), p.g(), p.r(), p.a()), (1, 2, 3, 4));
        assert_eq!(p.to_bgra_bytes(), [1, 2, 3, 4]);
    }

    // ── truncation ─────────────────────────────────────────────────────────

    #[test]
    fn truncates_toward_zero() {
        // 0.5 * 255 = 127.5
        assert_eq!(pack(Color::new(0.0, 0.0, 0.5, 0.0)).b(), 127);
    }

    #[test]
    fn out_of_range_red_spills_into_alpha() {
        // 1.2 * 255 = 306 = 0x132, the ninth bit lands in alpha.
        let p = pack(Color::new(1.2, 0.0, 0.0, 0.0));
        assert_eq!(p.r(), 0x32);
        assert_eq!(p.a(), 0x01);
    }

    #[test]
    fn color_packed_matches_free_function() {
        let c = Color::from_rgba8(10, 20, 30, 40);
        assert_eq!(c.packed(), pack(c));
    }
}

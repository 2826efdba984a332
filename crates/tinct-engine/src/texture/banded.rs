use crate::device::GpuDevice;
use crate::paint::{pack, Color, PackedPixel};

use super::target;
use super::{TextureError, TextureSource};

/// Horizontal stripes, one per color, top to bottom.
///
/// The height is split with integer division. When it does not divide evenly,
/// the last `height % colors.len()` rows are never written and keep whatever the
/// fresh texture held. Pad the color list if a fully covered image matters.
#[derive(Debug, Clone)]
pub struct BandedColorSource {
    gpu: GpuDevice,
    colors: Vec<Color>,
    pixels: Vec<PackedPixel>,
}

impl BandedColorSource {
    pub fn new(gpu: &GpuDevice, colors: impl Into<Vec<Color>>) -> Self {
        let colors = colors.into();
        let pixels = colors.iter().copied().map(pack).collect();
        Self {
            gpu: gpu.clone(),
            colors,
            pixels,
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

/// Row spans `(first_row, row_count)` of each band for an image `height` tall.
///
/// Empty when there are no bands or more bands than rows.
pub fn band_spans(height: u32, bands: usize) -> Vec<(u32, u32)> {
    let Ok(bands) = u32::try_from(bands) else {
        return Vec::new();
    };
    if bands == 0 {
        return Vec::new();
    }

    let row_height = height / bands;
    if row_height == 0 {
        return Vec::new();
    }

    (0..bands).map(|i| (i * row_height, row_height)).collect()
}

impl TextureSource for BandedColorSource {
    fn texture(&self, width: u32, height: u32) -> Result<wgpu::Texture, TextureError> {
        let texture = target::create_texture(
            &self.gpu,
            "tinct banded color texture",
            width,
            height,
            target::UPLOAD_USAGE,
        )?;

        for ((y, rows), pixel) in band_spans(height, self.pixels.len())
            .into_iter()
            .zip(&self.pixels)
        {
            let texels = vec![pixel.0.to_le(); (width as usize) * (rows as usize)];
            target::write_rows(&self.gpu, &texture, y, rows, &texels);
        }

        Ok(texture)
    }

    fn label(&self) -> &str {
        "banded colors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::headless_gpu;
    use crate::texture::read_pixels;

    fn palette() -> Vec<Color> {
        vec![
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.0, 1.0, 0.0),
            Color::rgb(0.0, 0.0, 1.0),
            Color::rgb(1.0, 1.0, 1.0),
        ]
    }

    // ── spans ──────────────────────────────────────────────────────────────

    #[test]
    fn spans_divide_evenly() {
        assert_eq!(band_spans(12, 3), vec![(0, 4), (4, 4), (8, 4)]);
    }

    #[test]
    fn spans_leave_remainder_rows_uncovered() {
        let spans = band_spans(10, 4);
        assert_eq!(spans, vec![(0, 2), (2, 2), (4, 2), (6, 2)]);
        let covered: u32 = spans.iter().map(|(_, rows)| rows).sum();
        assert_eq!(covered, 8);
    }

    #[test]
    fn spans_empty_without_colors_or_rows() {
        assert!(band_spans(10, 0).is_empty());
        assert!(band_spans(3, 4).is_empty());
    }

    // ── gpu ────────────────────────────────────────────────────────────────

    #[test]
    fn bands_hold_their_colors() {
        let Some(gpu) = headless_gpu() else { return };
        let colors = palette();
        let source = BandedColorSource::new(&gpu, colors.clone());

        let (width, height) = (5, 12);
        let pixels = read_pixels(&gpu, &source.texture(width, height).unwrap()).unwrap();

        for (row, line) in pixels.chunks(width as usize).enumerate() {
            let expected = pack(colors[row / 3]);
            assert!(line.iter().all(|p| *p == expected), "row {row}");
        }
    }

    #[test]
    fn uneven_height_fills_covered_rows() {
        let Some(gpu) = headless_gpu() else { return };
        let colors = palette();
        let source = BandedColorSource::new(&gpu, colors.clone());

        // 14 rows, 4 bands of 3: rows 12 and 13 are left alone.
        let (width, height) = (3, 14);
        let pixels = read_pixels(&gpu, &source.texture(width, height).unwrap()).unwrap();

        for (row, line) in pixels.chunks(width as usize).take(12).enumerate() {
            let expected = pack(colors[row / 3]);
            assert!(line.iter().all(|p| *p == expected), "row {row}");
        }
    }

    #[test]
    fn empty_palette_still_allocates() {
        let Some(gpu) = headless_gpu() else { return };
        let source = BandedColorSource::new(&gpu, Vec::new());
        let texture = source.texture(4, 4).unwrap();
        assert_eq!((texture.width(), texture.height()), (4, 4));
    }

    #[test]
    fn repeated_requests_are_pixel_identical() {
        let Some(gpu) = headless_gpu() else { return };
        let source = BandedColorSource::new(&gpu, palette());

        // Uneven height, so the unwritten rows are compared too.
        let first = read_pixels(&gpu, &source.texture(6, 13).unwrap()).unwrap();
        let second = read_pixels(&gpu, &source.texture(6, 13).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

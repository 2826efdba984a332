use crate::device::GpuDevice;
use crate::paint::{pack, Color, PackedPixel};

use super::target;
use super::{TextureError, TextureSource};

/// Fills the whole image with one color.
#[derive(Debug, Clone)]
pub struct SolidColorSource {
    gpu: GpuDevice,
    color: Color,
    pixel: PackedPixel,
}

impl SolidColorSource {
    pub fn new(gpu: &GpuDevice, color: Color) -> Self {
        Self {
            gpu: gpu.clone(),
            color,
            pixel: pack(color),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The packed value every pixel of the produced image holds.
    pub fn pixel(&self) -> PackedPixel {
        self.pixel
    }
}

impl TextureSource for SolidColorSource {
    fn texture(&self, width: u32, height: u32) -> Result<wgpu::Texture, TextureError> {
        let texture = target::create_texture(
            &self.gpu,
            "tinct solid color texture",
            width,
            height,
            target::UPLOAD_USAGE,
        )?;

        let texels = vec![self.pixel.0.to_le(); (width as usize) * (height as usize)];
        target::write_rows(&self.gpu, &texture, 0, height, &texels);

        Ok(texture)
    }

    fn label(&self) -> &str {
        "solid color"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::headless_gpu;
    use crate::texture::read_pixels;

    #[test]
    fn every_pixel_is_the_packed_color() {
        let Some(gpu) = headless_gpu() else { return };
        let color = Color::new(0.2, 0.6, 1.0, 1.0);
        let source = SolidColorSource::new(&gpu, color);

        let texture = source.texture(13, 7).unwrap();
        assert_eq!((texture.width(), texture.height()), (13, 7));

        let pixels = read_pixels(&gpu, &texture).unwrap();
        assert_eq!(pixels.len(), 13 * 7);
        assert!(pixels.iter().all(|p| *p == pack(color)));
    }

    #[test]
    fn repeated_calls_are_pixel_identical() {
        let Some(gpu) = headless_gpu() else { return };
        let source = SolidColorSource::new(&gpu, Color::rgb(1.0, 0.0, 0.0));

        let first = source.texture(9, 4).unwrap();
        let second = source.texture(9, 4).unwrap();
        assert_eq!(
            read_pixels(&gpu, &first).unwrap(),
            read_pixels(&gpu, &second).unwrap()
        );
    }

    #[test]
    fn zero_extent_is_rejected() {
        let Some(gpu) = headless_gpu() else { return };
        let source = SolidColorSource::new(&gpu, Color::white());

        assert_eq!(
            source.texture(0, 5).unwrap_err(),
            TextureError::EmptyExtent { width: 0, height: 5 }
        );
        assert!(matches!(
            source.texture(5, 0),
            Err(TextureError::EmptyExtent { .. })
        ));
    }

    #[test]
    fn oversized_extent_is_rejected() {
        let Some(gpu) = headless_gpu() else { return };
        let source = SolidColorSource::new(&gpu, Color::white());
        let max = gpu.max_texture_dimension();

        assert_eq!(
            source.texture(max + 1, 1).unwrap_err(),
            TextureError::ExceedsLimit { width: max + 1, height: 1, max }
        );
    }
}

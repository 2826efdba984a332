use anyhow::{Context, Result};

use crate::device::GpuDevice;
use crate::paint::{PackedPixel, PIXEL_FORMAT};

/// Copies a texture back to the CPU, row-major, one [`PackedPixel`] per texel.
///
/// Blocks until the GPU has finished all work submitted so far. The texture must
/// be in [`PIXEL_FORMAT`] and carry `COPY_SRC` usage, which every texture the
/// engine produces does.
pub fn read_pixels(gpu: &GpuDevice, texture: &wgpu::Texture) -> Result<Vec<PackedPixel>> {
    anyhow::ensure!(
        texture.format() == PIXEL_FORMAT,
        "cannot read back {:?}, expected {PIXEL_FORMAT:?}",
        texture.format()
    );

    let (width, height) = (texture.width(), texture.height());
    let row_bytes = width
        .checked_mul(4)
        .context("readback row size overflow")?;
    let padded_row_bytes = align_to(row_bytes, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
    let buffer_size = (padded_row_bytes as u64)
        .checked_mul(height as u64)
        .context("readback buffer size overflow")?;

    let readback = gpu.device().create_buffer(&wgpu::BufferDescriptor {
        label: Some("tinct readback"),
        size: buffer_size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = gpu
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tinct readback encoder"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row_bytes),
                rows_per_image: Some(height),
            },
        },
        texture.size(),
    );
    gpu.queue().submit(Some(encoder.finish()));

    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = tx.send(res);
    });
    gpu.device()
        .poll(wgpu::PollType::wait_indefinitely())
        .context("wgpu poll failed during readback")?;
    rx.recv()
        .context("readback channel closed")?
        .context("readback map failed")?;

    let mapped = slice.get_mapped_range();
    let mut out = Vec::with_capacity((width as usize) * (height as usize));
    for row in mapped.chunks(padded_row_bytes as usize) {
        out.extend(
            row[..row_bytes as usize]
                .chunks_exact(4)
                .map(|b| PackedPixel::from_bgra_bytes([b[0], b[1], b[2], b[3]])),
        );
    }
    drop(mapped);
    readback.unmap();

    Ok(out)
}

fn align_to(value: u32, alignment: u32) -> u32 {
    let mask = alignment - 1;
    (value + mask) & !mask
}

#[cfg(test)]
mod tests {
    use super::align_to;

    #[test]
    fn rows_align_to_copy_alignment() {
        assert_eq!(align_to(4, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
    }
}

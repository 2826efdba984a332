//! Allocation helpers shared by every source and pipeline factory.

use crate::device::GpuDevice;
use crate::paint::PIXEL_FORMAT;

use super::TextureError;

/// Usage for CPU-filled textures.
pub(crate) const UPLOAD_USAGE: wgpu::TextureUsages = wgpu::TextureUsages::TEXTURE_BINDING
    .union(wgpu::TextureUsages::COPY_DST)
    .union(wgpu::TextureUsages::COPY_SRC);

/// Usage for textures rasterized by a pipeline.
pub(crate) const RENDER_USAGE: wgpu::TextureUsages = UPLOAD_USAGE
    .union(wgpu::TextureUsages::RENDER_ATTACHMENT);

/// Checks the requested size against the precondition and the device limit.
pub(crate) fn validate_extent(
    gpu: &GpuDevice,
    width: u32,
    height: u32,
) -> Result<wgpu::Extent3d, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::EmptyExtent { width, height });
    }

    let max = gpu.max_texture_dimension();
    if width > max || height > max {
        return Err(TextureError::ExceedsLimit { width, height, max });
    }

    Ok(wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    })
}

pub(crate) fn create_texture(
    gpu: &GpuDevice,
    label: &str,
    width: u32,
    height: u32,
    usage: wgpu::TextureUsages,
) -> Result<wgpu::Texture, TextureError> {
    let size = validate_extent(gpu, width, height)?;

    Ok(gpu.device().create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: PIXEL_FORMAT,
        usage,
        view_formats: &[],
    }))
}

/// Allocates a render target, clears it to transparent, lets `draw` record into a
/// single pass and submits.
///
/// The pass configuration is rebuilt on every call; nothing about the target is
/// cached between calls.
pub(crate) fn render_to_texture<F>(
    gpu: &GpuDevice,
    label: &str,
    width: u32,
    height: u32,
    draw: F,
) -> Result<wgpu::Texture, TextureError>
where
    F: FnOnce(&mut wgpu::RenderPass<'_>),
{
    let texture = create_texture(gpu, label, width, height, RENDER_USAGE)?;
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = gpu
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });

    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        draw(&mut pass);
    }

    gpu.queue().submit(std::iter::once(encoder.finish()));
    Ok(texture)
}

/// Uploads `texels` (tightly packed, `width` per row) into rows `y..y + rows`.
pub(crate) fn write_rows(
    gpu: &GpuDevice,
    texture: &wgpu::Texture,
    y: u32,
    rows: u32,
    texels: &[u32],
) {
    let width = texture.width();
    debug_assert_eq!(texels.len(), (width * rows) as usize);

    gpu.queue().write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d { x: 0, y, z: 0 },
            aspect: wgpu::TextureAspect::All,
        },
        bytemuck::cast_slice(texels),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(rows),
        },
        wgpu::Extent3d {
            width,
            height: rows,
            depth_or_array_layers: 1,
        },
    );
}

use std::sync::Arc;

use crate::device::GpuDevice;
use crate::pipeline::library::{names, ShaderLibrary, FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::pipeline::{primitive, PipelineError};
use crate::texture::{SharedSource, TextureSource};

use super::{LatestHandle, LatestSlot, RenderTarget, RendererConfig};

/// Vertex count of the quad in `present.wgsl` (two triangles).
const QUAD_VERTICES: u32 = 6;

/// Writer for the renderer's active source. `None` clears it.
pub type SourceHandle = LatestHandle<Option<SharedSource>>;

impl SourceHandle {
    /// Makes `source` the active source. Takes effect on the next frame.
    pub fn set_source<S>(&self, source: S)
    where
        S: TextureSource + 'static,
    {
        self.publish(Some(Arc::new(source)));
    }

    /// Same as [`Self::set_source`] for an already shared source.
    pub fn set_shared(&self, source: SharedSource) {
        self.publish(Some(source));
    }

    /// Removes the active source. The last good frame stays on screen.
    pub fn clear_source(&self) {
        self.publish(None);
    }
}

/// What a frame ended up showing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// A texture was produced this frame and sampled.
    Fresh,
    /// No source, or it failed; the last good texture was sampled again.
    Stale,
    /// Nothing has succeeded yet; the target was only cleared.
    Blank,
}

struct LastFrame {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Samples the active source over the whole target every frame.
///
/// State: without a source every frame is a no-op draw that still produces a
/// presentable image; once a source is set it is asked for a texture sized to the
/// target on each frame. Sources are replaced, never edited.
pub struct TextureRenderer {
    config: RendererConfig,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    slot: LatestSlot<Option<SharedSource>>,
    last_frame: Option<LastFrame>,
    warned_failure: bool,
}

impl TextureRenderer {
    /// Builds the present pipeline for targets in `target_format`.
    pub fn new(
        gpu: &GpuDevice,
        target_format: wgpu::TextureFormat,
        config: RendererConfig,
    ) -> Result<Self, PipelineError> {
        let device = gpu.device();
        let vertex = ShaderLibrary::module(device, names::PRESENT, VERTEX_ENTRY)?;
        let fragment = ShaderLibrary::module(device, names::PRESENT, FRAGMENT_ENTRY)?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tinct present bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tinct present pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tinct present pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: primitive(wgpu::PrimitiveTopology::TriangleList),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tinct present sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: config.filter,
            min_filter: config.filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::info!("texture renderer ready ({target_format:?})");

        Ok(Self {
            config,
            pipeline,
            bind_group_layout,
            sampler,
            slot: LatestSlot::new(),
            last_frame: None,
            warned_failure: false,
        })
    }

    /// A writer that can swap the active source from any thread.
    pub fn source_handle(&self) -> SourceHandle {
        self.slot.handle()
    }

    /// Makes `source` active from the draw thread itself.
    pub fn set_source<S>(&self, source: S)
    where
        S: TextureSource + 'static,
    {
        self.source_handle().set_source(source);
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Records one frame into `target`, which is `width` x `height` pixels.
    ///
    /// Always records a pass, so the target is presentable whatever happens with
    /// the source.
    pub fn encode_frame(
        &mut self,
        gpu: &GpuDevice,
        target: &mut RenderTarget<'_>,
        width: u32,
        height: u32,
    ) -> FrameOutcome {
        let source = self.slot.latest().and_then(|s| s.clone());

        let outcome = match source.map(|s| (s.texture(width, height), s)) {
            Some((Ok(texture), _)) => {
                self.remember(gpu, texture);
                self.warned_failure = false;
                FrameOutcome::Fresh
            }
            Some((Err(err), source)) => {
                if !self.warned_failure {
                    log::warn!("{} source failed: {err}; keeping last frame", source.label());
                    self.warned_failure = true;
                }
                self.fallback()
            }
            None => self.fallback(),
        };

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tinct present pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.config.clear_color.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if let Some(frame) = self.last_frame.as_ref() {
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &frame.bind_group, &[]);
            pass.draw(0..QUAD_VERTICES, 0..1);
        }

        outcome
    }

    fn fallback(&self) -> FrameOutcome {
        if self.last_frame.is_some() {
            FrameOutcome::Stale
        } else {
            FrameOutcome::Blank
        }
    }

    fn remember(&mut self, gpu: &GpuDevice, texture: wgpu::Texture) {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tinct present bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.last_frame = Some(LastFrame {
            _texture: texture,
            bind_group,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{pack, Color, PackedPixel, PIXEL_FORMAT};
    use crate::test_support::headless_gpu;
    use crate::texture::target::{create_texture, RENDER_USAGE};
    use crate::texture::{read_pixels, SolidColorSource, TextureError};

    struct Broken;

    impl TextureSource for Broken {
        fn texture(&self, width: u32, height: u32) -> Result<wgpu::Texture, TextureError> {
            Err(TextureError::EmptyExtent { width, height })
        }
    }

    fn run_frame(
        renderer: &mut TextureRenderer,
        gpu: &GpuDevice,
        width: u32,
        height: u32,
    ) -> (FrameOutcome, Vec<PackedPixel>) {
        let target = create_texture(gpu, "test target", width, height, RENDER_USAGE).unwrap();
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        let outcome = {
            let mut rt = RenderTarget::new(&mut encoder, &view);
            renderer.encode_frame(gpu, &mut rt, width, height)
        };
        gpu.queue().submit(Some(encoder.finish()));

        (outcome, read_pixels(gpu, &target).unwrap())
    }

    fn renderer(gpu: &GpuDevice) -> TextureRenderer {
        let config = RendererConfig {
            clear_color: Color::rgb(0.0, 0.0, 1.0),
            filter: wgpu::FilterMode::Nearest,
        };
        TextureRenderer::new(gpu, PIXEL_FORMAT, config).unwrap()
    }

    #[test]
    fn blank_until_a_source_is_set() {
        let Some(gpu) = headless_gpu() else { return };
        let mut renderer = renderer(&gpu);

        let (outcome, pixels) = run_frame(&mut renderer, &gpu, 4, 4);
        assert_eq!(outcome, FrameOutcome::Blank);
        assert!(pixels.iter().all(|p| *p == pack(Color::rgb(0.0, 0.0, 1.0))));
    }

    #[test]
    fn active_source_is_sampled() {
        let Some(gpu) = headless_gpu() else { return };
        let mut renderer = renderer(&gpu);
        let red = Color::rgb(1.0, 0.0, 0.0);
        renderer.set_source(SolidColorSource::new(&gpu, red));

        let (outcome, pixels) = run_frame(&mut renderer, &gpu, 6, 3);
        assert_eq!(outcome, FrameOutcome::Fresh);
        assert!(pixels.iter().all(|p| *p == pack(red)));
    }

    #[test]
    fn failing_source_keeps_last_frame() {
        let Some(gpu) = headless_gpu() else { return };
        let mut renderer = renderer(&gpu);
        let green = Color::rgb(0.0, 1.0, 0.0);
        let handle = renderer.source_handle();

        handle.set_source(SolidColorSource::new(&gpu, green));
        assert_eq!(run_frame(&mut renderer, &gpu, 4, 4).0, FrameOutcome::Fresh);

        handle.set_source(Broken);
        let (outcome, pixels) = run_frame(&mut renderer, &gpu, 4, 4);
        assert_eq!(outcome, FrameOutcome::Stale);
        assert!(pixels.iter().all(|p| *p == pack(green)));
    }

    #[test]
    fn cleared_source_keeps_last_frame() {
        let Some(gpu) = headless_gpu() else { return };
        let mut renderer = renderer(&gpu);
        let white = Color::white();
        let handle = renderer.source_handle();

        handle.set_source(SolidColorSource::new(&gpu, white));
        run_frame(&mut renderer, &gpu, 2, 2);
        handle.clear_source();

        let (outcome, pixels) = run_frame(&mut renderer, &gpu, 2, 2);
        assert_eq!(outcome, FrameOutcome::Stale);
        assert!(pixels.iter().all(|p| *p == pack(white)));
    }

    #[test]
    fn newest_source_wins() {
        let Some(gpu) = headless_gpu() else { return };
        let mut renderer = renderer(&gpu);
        let handle = renderer.source_handle();
        let last = Color::rgb(1.0, 1.0, 0.0);

        handle.set_source(SolidColorSource::new(&gpu, Color::white()));
        handle.set_source(Broken);
        handle.set_source(SolidColorSource::new(&gpu, last));

        let (outcome, pixels) = run_frame(&mut renderer, &gpu, 3, 3);
        assert_eq!(outcome, FrameOutcome::Fresh);
        assert!(pixels.iter().all(|p| *p == pack(last)));
    }
}

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::device::GpuDevice;
use crate::texture::target;
use crate::texture::{TextureError, TextureSource};

use super::daemon::{binding_size, uniform_layout, ShaderDaemon};
use super::library::{names, ShaderLibrary, FRAGMENT_ENTRY, VERTEX_ENTRY};
use super::{opaque_target, primitive, PipelineError};

/// Vertex count of the quad strip in `gradient_vertex.wgsl`.
const QUAD_STRIP_VERTICES: u32 = 4;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    matrix: [[f32; 4]; 4],
}

struct GradientShared<D: ShaderDaemon> {
    gpu: GpuDevice,
    pipeline: wgpu::RenderPipeline,
    transform_layout: wgpu::BindGroupLayout,
    daemon: D,
}

/// Factory for full-screen-quad sources whose fragment stage is supplied by `D`.
///
/// The vertex stage is fixed: a quad covering clip space, multiplied by a
/// per-source transform. Everything color-related belongs to the daemon.
pub struct GradientPipeline<D: ShaderDaemon> {
    shared: Arc<GradientShared<D>>,
}

impl<D: ShaderDaemon> Clone for GradientPipeline<D> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<D: ShaderDaemon> GradientPipeline<D> {
    pub fn new(gpu: &GpuDevice, daemon: D) -> Result<Self, PipelineError> {
        let device = gpu.device();
        let vertex = ShaderLibrary::module(device, names::GRADIENT_VERTEX, VERTEX_ENTRY)?;
        let fragment = ShaderLibrary::module(device, daemon.shader_name(), FRAGMENT_ENTRY)?;

        let transform_layout = uniform_layout(
            gpu,
            "tinct gradient transform bgl",
            wgpu::ShaderStages::VERTEX,
            binding_size::<TransformUniform>(),
        );

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tinct gradient pipeline layout"),
            bind_group_layouts: &[&transform_layout, daemon.bind_group_layout()],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(daemon.shader_name()),
            layout: Some(&layout),
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
                targets: &opaque_target(),
            }),
            primitive: primitive(wgpu::PrimitiveTopology::TriangleStrip),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!("gradient pipeline ready ({})", daemon.shader_name());

        Ok(Self {
            shared: Arc::new(GradientShared {
                gpu: gpu.clone(),
                pipeline,
                transform_layout,
                daemon,
            }),
        })
    }

    pub fn daemon(&self) -> &D {
        &self.shared.daemon
    }

    /// Returns a source drawing the quad moved by `transform` with `data` bound
    /// for the daemon's fragment program.
    pub fn make_source(&self, transform: Mat4, data: D::Data) -> GradientSource<D> {
        let uniform = TransformUniform {
            matrix: transform.to_cols_array_2d(),
        };

        let device = self.shared.gpu.device();
        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tinct gradient transform ubo"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tinct gradient transform bind group"),
            layout: &self.shared.transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        GradientSource {
            shared: Arc::clone(&self.shared),
            _transform_buffer: transform_buffer,
            transform_bind_group,
            data,
        }
    }
}

/// Source produced by [`GradientPipeline::make_source`].
pub struct GradientSource<D: ShaderDaemon> {
    shared: Arc<GradientShared<D>>,
    _transform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
    data: D::Data,
}

impl<D: ShaderDaemon> TextureSource for GradientSource<D> {
    fn texture(&self, width: u32, height: u32) -> Result<wgpu::Texture, TextureError> {
        let shared = &self.shared;
        target::render_to_texture(
            &shared.gpu,
            "tinct gradient texture",
            width,
            height,
            |pass| {
                pass.set_pipeline(&shared.pipeline);
                pass.set_bind_group(0, &self.transform_bind_group, &[]);
                shared.daemon.encode(pass, &self.data);
                pass.draw(0..QUAD_STRIP_VERTICES, 0..1);
            },
        )
    }

    fn label(&self) -> &str {
        self.shared.daemon.shader_name()
    }
}

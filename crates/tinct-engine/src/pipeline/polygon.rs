use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::device::GpuDevice;
use crate::paint::Color;
use crate::texture::target;
use crate::texture::{TextureError, TextureSource};

use super::library::{names, ShaderLibrary, FRAGMENT_ENTRY, VERTEX_ENTRY};
use super::{opaque_target, primitive, PipelineError};

/// One polygon corner: clip-space position plus its color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PolygonVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl PolygonVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4  // color
    ];

    #[inline]
    pub fn new(position: Vec2, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PolygonVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

struct PolygonShared {
    gpu: GpuDevice,
    pipeline: wgpu::RenderPipeline,
}

/// Factory for sources that rasterize a vertex list as a triangle strip.
///
/// The list is drawn in the order given. Producing a sensible strip winding is
/// the caller's job.
#[derive(Clone)]
pub struct PolygonPipeline {
    shared: Arc<PolygonShared>,
}

impl PolygonPipeline {
    pub fn new(gpu: &GpuDevice) -> Result<Self, PipelineError> {
        let device = gpu.device();
        let vertex = ShaderLibrary::module(device, names::POLYGON, VERTEX_ENTRY)?;
        let fragment = ShaderLibrary::module(device, names::POLYGON, FRAGMENT_ENTRY)?;

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tinct polygon pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tinct polygon pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[PolygonVertex::layout()],
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

        log::info!("polygon pipeline ready");

        Ok(Self {
            shared: Arc::new(PolygonShared {
                gpu: gpu.clone(),
                pipeline,
            }),
        })
    }

    /// Uploads `vertices` and returns a source drawing them.
    ///
    /// Lists with fewer than three vertices are valid and produce a transparent image.
    pub fn make_source(&self, vertices: &[PolygonVertex]) -> PolygonSource {
        let vertex_buffer = (!vertices.is_empty()).then(|| {
            self.shared
                .gpu
                .device()
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("tinct polygon vbo"),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        log::debug!("polygon source with {} vertices", vertices.len());

        PolygonSource {
            shared: Arc::clone(&self.shared),
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

/// Source produced by [`PolygonPipeline::make_source`].
pub struct PolygonSource {
    shared: Arc<PolygonShared>,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl PolygonSource {
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl TextureSource for PolygonSource {
    fn texture(&self, width: u32, height: u32) -> Result<wgpu::Texture, TextureError> {
        target::render_to_texture(
            &self.shared.gpu,
            "tinct polygon texture",
            width,
            height,
            |pass| {
                let Some(vbo) = self.vertex_buffer.as_ref() else { return };
                if self.vertex_count < 3 {
                    return;
                }
                pass.set_pipeline(&self.shared.pipeline);
                pass.set_vertex_buffer(0, vbo.slice(..));
                pass.draw(0..self.vertex_count, 0..1);
            },
        )
    }

    fn label(&self) -> &str {
        "polygon"
    }
}

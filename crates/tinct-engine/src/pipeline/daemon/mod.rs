//! Shader daemons: the fragment half of a [`super::GradientPipeline`].
//!
//! A daemon names the fragment program it runs and knows how to bind that
//! program's data into a pass. The pipeline owns everything else (vertex stage,
//! transform, target, draw call), so a new color formula is a new daemon and
//! nothing in the pipeline changes.
//!
//! Building a daemon's data from domain parameters is daemon-specific and lives
//! on each concrete type (`make_data`).

mod peek;
mod solid;

pub use peek::{PeekGradient, PeekGradientData, PeekGradientDaemon};
pub use solid::{SolidFillData, SolidFillDaemon};

use wgpu::util::DeviceExt;

use crate::device::GpuDevice;

/// Bind group index reserved for daemon data. Group 0 holds the transform.
pub const DAEMON_GROUP: u32 = 1;

/// Fragment-stage strategy for [`super::GradientPipeline`].
pub trait ShaderDaemon: Send + Sync + 'static {
    /// Per-source uniform data, opaque to the pipeline.
    type Data: Send + Sync + 'static;

    /// Library name of the fragment program (see [`super::ShaderLibrary`]).
    fn shader_name(&self) -> &'static str;

    /// Layout of the bind group at [`DAEMON_GROUP`].
    fn bind_group_layout(&self) -> &wgpu::BindGroupLayout;

    /// Binds `data` into the in-flight pass.
    fn encode(&self, pass: &mut wgpu::RenderPass<'_>, data: &Self::Data);
}

/// A small immutable uniform buffer plus the bind group exposing it.
///
/// Both daemons in this module bind a single fragment uniform at binding 0.
#[derive(Debug)]
pub(crate) struct UniformBlock {
    _buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformBlock {
    pub(crate) fn new(
        gpu: &GpuDevice,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        contents: &[u8],
    ) -> Self {
        let buffer = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            _buffer: buffer,
            bind_group,
        }
    }

    pub(crate) fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(DAEMON_GROUP, &self.bind_group, &[]);
    }
}

/// Layout with one uniform buffer of `size` bytes at binding 0.
pub(crate) fn uniform_layout(
    gpu: &GpuDevice,
    label: &str,
    visibility: wgpu::ShaderStages,
    size: std::num::NonZeroU64,
) -> wgpu::BindGroupLayout {
    gpu.device()
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(size),
                },
                count: None,
            }],
        })
}

/// Binding size of a `Pod` uniform type.
pub(crate) const fn binding_size<T>() -> std::num::NonZeroU64 {
    match std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64) {
        Some(size) => size,
        None => panic!("uniform types are never zero-sized"),
    }
}

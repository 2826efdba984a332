use crate::device::GpuDevice;
use crate::paint::Color;
use crate::pipeline::library::names;

use super::{binding_size, uniform_layout, ShaderDaemon, UniformBlock};

/// Uniform data for [`SolidFillDaemon`]. Only that daemon can build or bind it.
#[derive(Debug)]
pub struct SolidFillData(UniformBlock);

/// Writes one color over everything the quad covers.
pub struct SolidFillDaemon {
    gpu: GpuDevice,
    layout: wgpu::BindGroupLayout,
}

impl SolidFillDaemon {
    pub fn new(gpu: &GpuDevice) -> Self {
        let layout = uniform_layout(
            gpu,
            "tinct solid fill bgl",
            wgpu::ShaderStages::FRAGMENT,
            binding_size::<[f32; 4]>(),
        );
        Self {
            gpu: gpu.clone(),
            layout,
        }
    }

    pub fn make_data(&self, color: Color) -> SolidFillData {
        SolidFillData(UniformBlock::new(
            &self.gpu,
            &self.layout,
            "tinct solid fill ubo",
            bytemuck::bytes_of(&color.to_array()),
        ))
    }
}

impl ShaderDaemon for SolidFillDaemon {
    type Data = SolidFillData;

    fn shader_name(&self) -> &'static str {
        names::SOLID_FILL
    }

    fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    fn encode(&self, pass: &mut wgpu::RenderPass<'_>, data: &SolidFillData) {
        data.0.bind(pass);
    }
}

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::device::GpuDevice;
use crate::paint::Color;
use crate::pipeline::library::names;

use super::{binding_size, uniform_layout, ShaderDaemon, UniformBlock};

/// Parameters of a smooth peak gradient.
///
/// With `v = dot(p, slope.xy) + slope.z` for quad coordinate `p` in `[-1, 1]²`,
/// the line `v = 0` is painted `peak`; negative `v` eases toward `negative` and
/// positive `v` toward `positive`, both saturating at `|v| = 1`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PeekGradient {
    pub negative: Color,
    pub positive: Color,
    pub peak: Color,
    pub slope: Vec4,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PeekUniform {
    negative: [f32; 4],
    positive: [f32; 4],
    peak: [f32; 4],
    slope: [f32; 4],
}

impl From<PeekGradient> for PeekUniform {
    fn from(g: PeekGradient) -> Self {
        Self {
            negative: g.negative.to_array(),
            positive: g.positive.to_array(),
            peak: g.peak.to_array(),
            slope: g.slope.to_array(),
        }
    }
}

/// Uniform data for [`PeekGradientDaemon`].
///
/// Each daemon has its own data type, so a gradient pipeline only accepts data
/// its daemon built:
///
/// ```compile_fail
/// use tinct_engine::device::GpuDevice;
/// use tinct_engine::paint::Color;
/// use tinct_engine::pipeline::{GradientPipeline, PeekGradientDaemon, SolidFillDaemon};
///
/// fn mix(gpu: &GpuDevice) {
///     let peek = GradientPipeline::new(gpu, PeekGradientDaemon::new(gpu)).unwrap();
///     let fill = SolidFillDaemon::new(gpu).make_data(Color::white());
///     let _ = peek.make_source(glam::Mat4::IDENTITY, fill);
/// }
/// ```
///
/// ```no_run
/// use tinct_engine::device::GpuDevice;
/// use tinct_engine::paint::Color;
/// use tinct_engine::pipeline::{GradientPipeline, PeekGradient, PeekGradientDaemon};
///
/// fn matched(gpu: &GpuDevice) {
///     let peek = GradientPipeline::new(gpu, PeekGradientDaemon::new(gpu)).unwrap();
///     let data = peek.daemon().make_data(PeekGradient {
///         negative: Color::black(),
///         positive: Color::white(),
///         peak: Color::rgb(1.0, 0.0, 0.0),
///         slope: glam::Vec4::X,
///     });
///     let _ = peek.make_source(glam::Mat4::IDENTITY, data);
/// }
/// ```
#[derive(Debug)]
pub struct PeekGradientData(UniformBlock);

/// Runs the `smooth_peek` fragment program.
pub struct PeekGradientDaemon {
    gpu: GpuDevice,
    layout: wgpu::BindGroupLayout,
}

impl PeekGradientDaemon {
    pub fn new(gpu: &GpuDevice) -> Self {
        let layout = uniform_layout(
            gpu,
            "tinct peek gradient bgl",
            wgpu::ShaderStages::FRAGMENT,
            binding_size::<PeekUniform>(),
        );
        Self {
            gpu: gpu.clone(),
            layout,
        }
    }

    pub fn make_data(&self, gradient: PeekGradient) -> PeekGradientData {
        PeekGradientData(UniformBlock::new(
            &self.gpu,
            &self.layout,
            "tinct peek gradient ubo",
            bytemuck::bytes_of(&PeekUniform::from(gradient)),
        ))
    }
}

impl ShaderDaemon for PeekGradientDaemon {
    type Data = PeekGradientData;

    fn shader_name(&self) -> &'static str {
        names::SMOOTH_PEEK
    }

    fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    fn encode(&self, pass: &mut wgpu::RenderPass<'_>, data: &PeekGradientData) {
        data.0.bind(pass);
    }
}

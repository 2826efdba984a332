//! Pipeline factories.
//!
//! Each factory compiles its GPU pipeline state once and then stamps out cheap
//! [`crate::texture::TextureSource`] values that share it. The shared state sits
//! behind an `Arc`, so a source keeps the pipeline it draws with alive even if the
//! factory value itself is dropped first.
//!
//! Convention:
//! - every target is [`crate::paint::PIXEL_FORMAT`], cleared to transparent
//! - geometry is in clip space, `(-1, -1)` bottom-left, `(1, 1)` top-right
//! - shader programs come from [`ShaderLibrary`] by name

pub mod daemon;
mod error;
mod gradient;
pub(crate) mod library;
mod polygon;

pub use daemon::{
    PeekGradient, PeekGradientDaemon, PeekGradientData, ShaderDaemon, SolidFillDaemon, SolidFillData,
};
pub use error::PipelineError;
pub use gradient::{GradientPipeline, GradientSource};
pub use library::{names, ShaderLibrary};
pub use polygon::{PolygonPipeline, PolygonSource, PolygonVertex};

/// Replace blending: sources write their colors verbatim.
pub(crate) fn opaque_target() -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format: crate::paint::PIXEL_FORMAT,
        blend: None,
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

pub(crate) fn primitive(topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

use crate::paint::Color;

/// Renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Fill used until the first source succeeds.
    pub clear_color: Color,

    /// Filter used when the source texture is scaled onto the target.
    pub filter: wgpu::FilterMode,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::black(),
            filter: wgpu::FilterMode::Linear,
        }
    }
}

use winit::dpi::PhysicalSize;

use crate::paint::PIXEL_FORMAT;

use super::SurfaceErrorAction;

/// Returns the engine pixel format if the surface can present it.
pub(crate) fn pinned_surface_format(
    caps: &wgpu::SurfaceCapabilities,
) -> Option<wgpu::TextureFormat> {
    caps.formats.contains(&PIXEL_FORMAT).then_some(PIXEL_FORMAT)
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// wgpu rejects a 0x0 surface configuration. A surface that is not configurable
/// yet keeps its configuration deferred until the next non-empty resize.
pub(crate) fn configurable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

/// Applies a new drawable size.
///
/// wgpu does not support configuring a surface with a 0x0 size; in that case,
/// only the tracked size is updated and configuration is deferred.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if !configurable(new_size) {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if configurable(size) {
                surface.configure(device, config);
            }
            log::warn!("surface {err:?}; reconfigured");
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => {
            log::error!("surface out of memory");
            SurfaceErrorAction::Fatal
        }
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => {
            log::warn!("surface {err:?}; skipping frame");
            SurfaceErrorAction::SkipFrame
        }
    }
}

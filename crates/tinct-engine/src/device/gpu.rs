use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::paint::PIXEL_FORMAT;

use super::surface;
use super::{GpuDevice, GpuFrame, GpuInit, SurfaceErrorAction};

/// Owns the window surface and the device it presents with.
///
/// This type is the low-level display context:
/// - creates and stores Instance/Adapter and a [`GpuDevice`]
/// - creates and configures the Surface (swapchain) in [`PIXEL_FORMAT`]
/// - acquires frames and provides an encoder + view for rendering
pub struct Gpu<'w> {
    /// wgpu instance used to create the adapter and surface.
    _instance: wgpu::Instance,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the runtime keeps the window alive
    /// for as long as this value exists.
    surface: wgpu::Surface<'w>,

    /// Selected adapter.
    _adapter: wgpu::Adapter,

    /// Device + queue shared with sources and pipelines.
    handles: GpuDevice,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu. Fails if the surface
    /// cannot present [`PIXEL_FORMAT`]. A window that starts at 0x0 is accepted;
    /// its surface is configured on the first non-empty resize.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();

        let GpuInit {
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let handles =
            GpuDevice::request(&adapter, "tinct device", required_features, required_limits)
                .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::pinned_surface_format(&surface_caps)
            .with_context(|| format!("surface cannot present {PIXEL_FORMAT:?}"))?;

        let alpha_mode = surface::choose_alpha_mode(&surface_caps, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        if surface::configurable(size) {
            surface.configure(handles.device(), &config);
        } else {
            log::debug!("window starts empty; surface configuration deferred");
        }

        Ok(Self {
            _instance: instance,
            surface,
            _adapter: adapter,
            handles,
            config,
            size,
        })
    }

    /// Returns the active surface format (always [`PIXEL_FORMAT`]).
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns the shared device handle.
    pub fn handles(&self) -> &GpuDevice {
        &self.handles
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            self.handles.device(),
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder =
            self.handles
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("tinct frame encoder"),
                });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        self.handles
            .queue()
            .submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(
            &self.surface,
            self.handles.device(),
            &self.config,
            self.size,
            err,
        )
    }
}

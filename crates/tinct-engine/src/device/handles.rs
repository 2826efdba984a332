use anyhow::{Context, Result};

/// Cloneable handle to the logical device and its queue.
///
/// Texture sources and pipeline factories keep one of these so they can allocate
/// and submit work on their own. wgpu handles are internally reference counted,
/// so cloning is cheap and every clone talks to the same device.
#[derive(Debug, Clone)]
pub struct GpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuDevice {
    pub(crate) fn from_parts(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Creates a device without any surface.
    ///
    /// Used for offscreen rendering and tests. Fails when no adapter is present.
    pub async fn headless() -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a GPU adapter for headless rendering")?;

        Self::request(
            &adapter,
            "tinct headless device",
            wgpu::Features::empty(),
            wgpu::Limits::default(),
        )
        .await
    }

    /// Requests a device/queue pair from `adapter`.
    pub(crate) async fn request(
        adapter: &wgpu::Adapter,
        label: &str,
        required_features: wgpu::Features,
        required_limits: wgpu::Limits,
    ) -> Result<Self> {
        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(label),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self::from_parts(device, queue))
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Largest width/height accepted for a 2D texture on this device.
    #[inline]
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

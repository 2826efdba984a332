//! tinct engine crate.
//!
//! Texture sources, the pipeline factories that rasterize them, and the renderer
//! that puts the active one on screen every frame. The window/runtime pieces
//! (`window`, `core`, `input`, `time`) host it on a winit event loop.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod paint;
pub mod texture;
pub mod pipeline;
pub mod render;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::device::GpuDevice;

    /// A headless device, or `None` when the machine has no usable adapter.
    /// GPU tests return early on `None`.
    pub(crate) fn headless_gpu() -> Option<GpuDevice> {
        match pollster::block_on(GpuDevice::headless()) {
            Ok(gpu) => Some(gpu),
            Err(err) => {
                eprintln!("skipping GPU test: {err:#}");
                None
            }
        }
    }
}

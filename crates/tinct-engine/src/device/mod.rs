//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue (windowed or headless)
//! - creating & configuring the Surface (swapchain) pinned to the engine pixel format
//! - acquiring frames and providing encoders/views for rendering

mod error;
mod frame;
mod gpu;
mod handles;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use handles::GpuDevice;
pub use init::GpuInit;

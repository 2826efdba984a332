//! The contract between the runtime loop and the host application.
//!
//! The runtime owns the window, its GPU surface and input; the app sees one
//! [`FrameCtx`] per redraw and decides what the renderer shows.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};

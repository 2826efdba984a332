use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// Returned by app callbacks to keep running or stop the event loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Implemented by the host application.
pub trait App {
    /// Raw window events, before the runtime handles resize and close.
    /// Input is also available already translated in [`FrameCtx`].
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per redraw. Usually ends with [`FrameCtx::present`].
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}

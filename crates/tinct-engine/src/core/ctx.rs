use winit::window::{Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::{FrameOutcome, RenderTarget, TextureRenderer};
use crate::time::FrameTime;

use super::app::AppControl;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Physical size of the drawable area as `(width, height)`.
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:       WindowCtx<'a>,
    pub gpu:          &'a mut Gpu<'w>,
    pub input:        &'a InputState,
    pub input_frame:  &'a InputFrame,
    pub time:         FrameTime,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the next surface image, lets `renderer` fill it, then presents it.
    ///
    /// A minimized window (zero-sized surface) skips the frame. Surface errors go
    /// through [`Gpu::handle_surface_error`]; only a fatal one ends the app.
    pub fn present(&mut self, renderer: &mut TextureRenderer) -> AppControl {
        let size = self.gpu.size();
        let (width, height) = (size.width, size.height);
        if width == 0 || height == 0 {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        let outcome = {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            renderer.encode_frame(self.gpu.handles(), &mut target, width, height)
        };
        if outcome == FrameOutcome::Blank {
            log::trace!("frame {} blank", self.time.frame_index);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}

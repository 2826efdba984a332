use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tinct".to_string(),
            initial_size: LogicalSize::new(960.0, 640.0),
        }
    }
}

/// Runs one window until it closes or the app returns [`AppControl::Exit`].
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            window: None,
        };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")
    }
}

/// The window plus everything borrowing it.
#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.with_clock_mut(|clock| clock.reset());
        self.with_window(|w| w.request_redraw());
    }

    /// Runs one app frame, then drops this frame's input deltas.
    fn frame<A: App>(&mut self, app: &mut A) -> AppControl {
        self.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
                input: fields.input_state,
                input_frame: fields.input_frame,
                time: fields.clock.tick(),
            };
            let control = app.on_frame(&mut ctx);

            fields.input_frame.clear();
            control
        })
    }
}

/// What the runtime does with a window event after the app has seen it.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Step {
    Close,
    Resize(PhysicalSize<u32>),
    /// Scale changed; re-read the window's inner size.
    ResizeToWindow,
    Redraw,
    Ignore,
}

impl Step {
    fn for_event(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Self::Close,
            WindowEvent::Resized(size) => Self::Resize(*size),
            WindowEvent::ScaleFactorChanged { .. } => Self::ResizeToWindow,
            WindowEvent::RedrawRequested => Self::Redraw,
            _ => Self::Ignore,
        }
    }
}

struct Host<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    window: Option<WindowEntry>,
}

impl<A: App> Host<A> {
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        // Surface and device go before the loop does.
        self.window = None;
        event_loop.exit();
    }
}

impl<A: App> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match WindowEntry::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(e) => {
                log::error!("failed to open window: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Sources can change from driver threads at any time, so redraw continuously.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        let mut control = self.app.on_window_event(window_id, &event);

        if control == AppControl::Continue {
            control = match Step::for_event(&event) {
                Step::Close => AppControl::Exit,
                Step::Resize(size) => {
                    entry.resize(size);
                    AppControl::Continue
                }
                Step::ResizeToWindow => {
                    let size = entry.with_window(|w| w.inner_size());
                    entry.resize(size);
                    AppControl::Continue
                }
                Step::Redraw => entry.frame(&mut self.app),
                Step::Ignore => AppControl::Continue,
            };
        }

        if control == AppControl::Exit {
            self.shut_down(event_loop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_and_destroy_end_the_run() {
        assert_eq!(Step::for_event(&WindowEvent::CloseRequested), Step::Close);
        assert_eq!(Step::for_event(&WindowEvent::Destroyed), Step::Close);
    }

    #[test]
    fn resize_carries_the_new_size() {
        let size = PhysicalSize::new(320, 0);
        assert_eq!(Step::for_event(&WindowEvent::Resized(size)), Step::Resize(size));
    }

    #[test]
    fn redraw_runs_a_frame_and_input_is_ignored() {
        assert_eq!(Step::for_event(&WindowEvent::RedrawRequested), Step::Redraw);
        assert_eq!(Step::for_event(&WindowEvent::Focused(true)), Step::Ignore);
    }
}

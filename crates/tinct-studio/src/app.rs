use anyhow::{Context, Result};
use glam::{Mat4, Vec4};
use tinct_engine::core::{App, AppControl, FrameCtx};
use tinct_engine::device::GpuDevice;
use tinct_engine::input::{pixel_to_clip, InputFrame, Key, MouseButton};
use tinct_engine::paint::Color;
use tinct_engine::pipeline::{
    GradientPipeline, PeekGradient, PeekGradientDaemon, PolygonPipeline,
};
use tinct_engine::render::{SourceHandle, TextureRenderer};
use tinct_engine::texture::{BandedColorSource, SolidColorSource};

use crate::config::StudioConfig;
use crate::drivers::ColorCycle;
use crate::editor::PolygonEditor;

/// What the window shows. Keys `1`-`4` switch.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    ColorCycle,
    Banded,
    Polygon,
    Gradient,
}

impl Mode {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Digit1 => Some(Self::ColorCycle),
            Key::Digit2 => Some(Self::Banded),
            Key::Digit3 => Some(Self::Polygon),
            Key::Digit4 => Some(Self::Gradient),
            _ => None,
        }
    }

    /// Last mode key pressed this frame, if any.
    fn selected(frame: &InputFrame) -> Option<Self> {
        [Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4]
            .into_iter()
            .filter(|k| frame.pressed(*k))
            .filter_map(Self::from_key)
            .last()
    }
}

/// GPU-side state, created on the first frame once a device exists.
struct Studio {
    gpu: GpuDevice,
    renderer: TextureRenderer,
    sources: SourceHandle,
    polygons: PolygonPipeline,
    gradients: GradientPipeline<PeekGradientDaemon>,

    mode: Mode,
    cycle: Option<ColorCycle>,
    editor: PolygonEditor,
    spin: f32,
}

impl Studio {
    fn new(gpu: &GpuDevice, format: wgpu::TextureFormat, config: &StudioConfig) -> Result<Self> {
        let renderer = TextureRenderer::new(gpu, format, config.renderer)
            .context("failed to build texture renderer")?;
        let polygons = PolygonPipeline::new(gpu).context("failed to build polygon pipeline")?;
        let gradients = GradientPipeline::new(gpu, PeekGradientDaemon::new(gpu))
            .context("failed to build gradient pipeline")?;

        let mut studio = Self {
            gpu: gpu.clone(),
            sources: renderer.source_handle(),
            renderer,
            polygons,
            gradients,
            mode: config.start_mode,
            cycle: None,
            editor: PolygonEditor::new(config.palette.clone()),
            spin: 0.0,
        };
        studio.enter(config.start_mode, config)?;
        Ok(studio)
    }

    fn enter(&mut self, mode: Mode, config: &StudioConfig) -> Result<()> {
        // Joins the thread, so its last publish lands before ours.
        self.cycle = None;
        self.mode = mode;
        log::info!("mode: {mode:?}");

        match mode {
            Mode::ColorCycle => {
                let gpu = self.gpu.clone();
                let sources = self.sources.clone();
                self.cycle = Some(ColorCycle::spawn(config.tick, config.cycle_step, move |color| {
                    sources.set_source(SolidColorSource::new(&gpu, color));
                })?);
            }
            Mode::Banded => {
                self.sources
                    .set_source(BandedColorSource::new(&self.gpu, config.bands.clone()));
            }
            Mode::Polygon => self.publish_polygon(),
            Mode::Gradient => self.publish_gradient(config),
        }
        Ok(())
    }

    fn publish_polygon(&self) {
        let source = self.polygons.make_source(&self.editor.strip());
        log::debug!("polygon: {} corners", self.editor.len());
        self.sources.set_source(source);
    }

    fn publish_gradient(&self, config: &StudioConfig) {
        let slope = glam::Vec2::from_angle(self.spin) * config.gradient_steepness;
        let data = self.gradients.daemon().make_data(PeekGradient {
            negative: Color::rgb(0.05, 0.1, 0.35),
            positive: Color::rgb(0.9, 0.35, 0.1),
            peak: Color::white(),
            slope: Vec4::new(slope.x, slope.y, 0.0, 0.0),
        });
        self.sources
            .set_source(self.gradients.make_source(Mat4::IDENTITY, data));
    }

    fn edit_polygon(&mut self, frame: &InputFrame, width: u32, height: u32) {
        let mut changed = false;

        for click in frame.clicks_of(MouseButton::Left) {
            if let Some(p) = pixel_to_clip(click.x, click.y, width, height) {
                self.editor.push(p);
                changed = true;
            }
        }
        if frame.pressed(Key::Backspace) {
            changed |= self.editor.undo();
        }

        if changed {
            self.publish_polygon();
        }
    }
}

/// Window host: owns the renderer and plays the driver for each mode.
pub struct StudioApp {
    config: StudioConfig,
    studio: Option<Studio>,
}

impl StudioApp {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            config,
            studio: None,
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        if self.studio.is_none() {
            match Studio::new(ctx.gpu.handles(), ctx.gpu.surface_format(), &self.config) {
                Ok(studio) => self.studio = Some(studio),
                Err(err) => {
                    log::error!("{err:#}");
                    return AppControl::Exit;
                }
            }
        }
        let Some(studio) = self.studio.as_mut() else {
            return AppControl::Exit;
        };

        if let Some(mode) = Mode::selected(ctx.input_frame) {
            if let Err(err) = studio.enter(mode, &self.config) {
                log::error!("{err:#}");
                return AppControl::Exit;
            }
        }

        match studio.mode {
            Mode::Polygon => {
                let size = ctx.gpu.size();
                studio.edit_polygon(ctx.input_frame, size.width, size.height);
            }
            Mode::Gradient => {
                studio.spin += self.config.spin_speed * ctx.time.dt;
                studio.publish_gradient(&self.config);
            }
            Mode::ColorCycle | Mode::Banded => {}
        }

        ctx.present(&mut studio.renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_keys_select_modes() {
        assert_eq!(Mode::from_key(Key::Digit1), Some(Mode::ColorCycle));
        assert_eq!(Mode::from_key(Key::Digit2), Some(Mode::Banded));
        assert_eq!(Mode::from_key(Key::Digit3), Some(Mode::Polygon));
        assert_eq!(Mode::from_key(Key::Digit4), Some(Mode::Gradient));
        assert_eq!(Mode::from_key(Key::Space), None);
        assert_eq!(Mode::from_key(Key::Other(42)), None);
    }

    #[test]
    fn no_mode_key_no_switch() {
        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::Backspace);
        assert_eq!(Mode::selected(&frame), None);

        frame.keys_pressed.insert(Key::Digit3);
        assert_eq!(Mode::selected(&frame), Some(Mode::Polygon));
    }
}

use std::time::Duration;

use tinct_engine::paint::Color;
use tinct_engine::render::RendererConfig;

use crate::app::Mode;

/// Studio settings. There is no config file; `main` uses the defaults.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Sleep between color-cycle steps.
    pub tick: Duration,

    /// Color-cycle rotation per tick, in radians.
    pub cycle_step: f32,

    /// Gradient slope rotation speed, in radians per second.
    pub spin_speed: f32,

    /// Steepness of the peek gradient. Larger means a thinner peak.
    pub gradient_steepness: f32,

    pub start_mode: Mode,

    /// Stripes for the banded mode, top to bottom.
    pub bands: Vec<Color>,

    /// Vertex colors for the polygon editor, used in rotation.
    pub palette: Vec<Color>,

    pub renderer: RendererConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(160),
            cycle_step: 1.0_f32.to_radians(),
            spin_speed: 0.6,
            gradient_steepness: 3.0,
            start_mode: Mode::ColorCycle,
            bands: vec![
                Color::rgb(1.0, 0.0, 0.0),
                Color::rgb(0.0, 1.0, 0.0),
                Color::rgb(0.0, 0.0, 1.0),
                Color::rgb(1.0, 1.0, 1.0),
            ],
            palette: vec![
                Color::rgb(1.0, 0.2, 0.2),
                Color::rgb(1.0, 0.8, 0.1),
                Color::rgb(0.2, 0.9, 0.3),
                Color::rgb(0.1, 0.7, 1.0),
                Color::rgb(0.7, 0.3, 1.0),
            ],
            renderer: RendererConfig::default(),
        }
    }
}

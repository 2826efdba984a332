//! tinct studio: a window showing one texture source at a time.
//!
//! Keys: `1` color cycle, `2` bands, `3` polygon editor (click to add a corner,
//! Backspace to undo), `4` spinning gradient, `Esc` to quit.

mod app;
mod config;
mod drivers;
mod editor;

use anyhow::Result;
use tinct_engine::device::GpuInit;
use tinct_engine::logging::{init_logging, LoggingConfig};
use tinct_engine::window::{Runtime, RuntimeConfig};

use crate::app::StudioApp;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let runtime = RuntimeConfig {
        title: "tinct studio".to_string(),
        ..Default::default()
    };

    Runtime::run(runtime, GpuInit::default(), StudioApp::new(StudioConfig::default()))
}

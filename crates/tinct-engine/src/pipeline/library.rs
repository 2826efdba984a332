//! Named, build-time embedded shader programs.
//!
//! Pipelines never carry shader text. They ask for a program by a stable name and
//! the library hands back a compiled module, so swapping a fragment formula is a
//! matter of adding an entry here and pointing a daemon at its name.

use super::PipelineError;

/// Stable program identities.
pub mod names {
    pub const POLYGON: &str = "tinct.polygon";
    pub const GRADIENT_VERTEX: &str = "tinct.gradient.vertex";
    pub const SOLID_FILL: &str = "tinct.gradient.solid_fill";
    pub const SMOOTH_PEEK: &str = "tinct.gradient.smooth_peek";
    pub const PRESENT: &str = "tinct.present";
}

pub(crate) const VERTEX_ENTRY: &str = "vs_main";
pub(crate) const FRAGMENT_ENTRY: &str = "fs_main";

struct Program {
    name: &'static str,
    source: &'static str,
    entries: &'static [&'static str],
}

const PROGRAMS: &[Program] = &[
    Program {
        name: names::POLYGON,
        source: include_str!("shaders/polygon.wgsl"),
        entries: &[VERTEX_ENTRY, FRAGMENT_ENTRY],
    },
    Program {
        name: names::GRADIENT_VERTEX,
        source: include_str!("shaders/gradient_vertex.wgsl"),
        entries: &[VERTEX_ENTRY],
    },
    Program {
        name: names::SOLID_FILL,
        source: include_str!("shaders/solid_fill.wgsl"),
        entries: &[FRAGMENT_ENTRY],
    },
    Program {
        name: names::SMOOTH_PEEK,
        source: include_str!("shaders/smooth_peek.wgsl"),
        entries: &[FRAGMENT_ENTRY],
    },
    Program {
        name: names::PRESENT,
        source: include_str!("shaders/present.wgsl"),
        entries: &[VERTEX_ENTRY, FRAGMENT_ENTRY],
    },
];

/// Lookup into the embedded program table.
pub struct ShaderLibrary;

impl ShaderLibrary {
    /// All program names, in table order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        PROGRAMS.iter().map(|p| p.name)
    }

    /// WGSL text of a program.
    pub fn source(name: &str) -> Result<&'static str, PipelineError> {
        Self::find(name).map(|p| p.source)
    }

    /// Whether `name` exists and exports `entry`.
    pub fn has_entry(name: &str, entry: &str) -> bool {
        Self::find(name).is_ok_and(|p| p.entries.contains(&entry))
    }

    /// Compiles the program `name`, checking that it exports `entry`.
    ///
    /// WGSL validation errors are reported by wgpu through the device's
    /// uncaptured-error handler, which aborts by default.
    pub fn module(
        device: &wgpu::Device,
        name: &str,
        entry: &'static str,
    ) -> Result<wgpu::ShaderModule, PipelineError> {
        let program = Self::find(name)?;
        if !program.entries.contains(&entry) {
            return Err(PipelineError::MissingEntryPoint {
                name: name.to_string(),
                entry,
            });
        }

        log::debug!("compiling shader program {name} ({entry})");
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(program.name),
            source: wgpu::ShaderSource::Wgsl(program.source.into()),
        }))
    }

    fn find(name: &str) -> Result<&'static Program, PipelineError> {
        PROGRAMS
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PipelineError::UnknownShader {
                name: name.to_string(),
            })
    }
}

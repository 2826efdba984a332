use thiserror::Error;

/// Pipeline construction failure.
///
/// Treated as fatal by callers: a program that cannot be found means the build
/// or environment is broken, not that a later retry could succeed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum PipelineError {
    #[error("no shader program named `{name}` in the library")]
    UnknownShader { name: String },

    #[error("shader program `{name}` has no `{entry}` entry point")]
    MissingEntryPoint { name: String, entry: &'static str },
}

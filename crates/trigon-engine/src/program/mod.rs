//! Program linking.
//!
//! - [`ProgramLinker`] attaches two compiled stages, binds the fragment output
//!   and links
//! - [`ShaderPipeline`] owns a linked program together with the shaders still
//!   attached to it and releases them in a safe order

mod link;
mod pipeline;

pub use link::{LinkError, ProgramLinker};
pub use pipeline::{PipelineError, ShaderPipeline};

//! Shader sources and compilation.
//!
//! - [`ShaderSource`] pairs a stage with immutable GLSL text
//! - [`ShaderCompiler`] turns a source into a driver shader object
//! - [`builtin`] holds the harness's own vertex/fragment stages

pub mod builtin;
mod compile;
mod source;

pub use compile::{CompileError, ShaderCompiler};
pub use source::{ShaderKind, ShaderSource};

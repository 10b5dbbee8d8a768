use std::fmt;

use crate::driver::{Driver, ProgramHandle, ShaderHandle};
use crate::shader::{CompileError, ShaderCompiler, ShaderSource};

use super::{LinkError, ProgramLinker};

/// Why a [`ShaderPipeline`] could not be built.
///
/// Compile failures are kept for diagnostics; the link failure they caused is
/// what makes the build fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    pub compile: Vec<CompileError>,
    pub link: LinkError,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in &self.compile {
            writeln!(f, "{err}")?;
        }
        write!(f, "{}", self.link)
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.link)
    }
}

/// A linked program and the two shader objects attached to it.
///
/// The shaders are never detached, so they must outlive the program. The
/// pipeline owns all three and [`release`](Self::release) deletes the program
/// before the shaders.
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderPipeline {
    program: ProgramHandle,
    vertex: ShaderHandle,
    fragment: ShaderHandle,
}

impl ShaderPipeline {
    /// Compiles both stages and links them.
    ///
    /// A stage that fails to compile is carried into the link as the null
    /// handle. On any failure every object created here is released before
    /// returning.
    pub fn build<D: Driver + ?Sized>(
        driver: &D,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
        frag_output: &str,
    ) -> Result<Self, PipelineError> {
        let compiler = ShaderCompiler::new(driver);
        let (vs, vs_err) = compiler.compile_or_null(vertex);
        let (fs, fs_err) = compiler.compile_or_null(fragment);

        match ProgramLinker::new(driver).link(vs, fs, frag_output) {
            Ok(program) => Ok(Self {
                program,
                vertex: vs,
                fragment: fs,
            }),
            Err(link) => {
                link.release(driver);
                for shader in [fs, vs] {
                    if !shader.is_null() {
                        driver.delete_shader(shader);
                    }
                }
                Err(PipelineError {
                    compile: vs_err.into_iter().chain(fs_err).collect(),
                    link,
                })
            }
        }
    }

    #[inline]
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    #[inline]
    pub fn vertex_shader(&self) -> ShaderHandle {
        self.vertex
    }

    #[inline]
    pub fn fragment_shader(&self) -> ShaderHandle {
        self.fragment
    }

    /// Deletes the program, then the fragment and vertex shaders.
    pub fn release<D: Driver + ?Sized>(self, driver: &D) {
        driver.delete_program(self.program);
        driver.delete_shader(self.fragment);
        driver.delete_shader(self.vertex);
        log::debug!("released {:?}", self.program);
    }
}

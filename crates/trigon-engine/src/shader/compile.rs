use std::fmt;

use crate::driver::{Driver, ShaderHandle};

use super::{ShaderKind, ShaderSource};

/// A shader stage that failed to compile.
///
/// The failure is reported, not fatal: callers that keep going get the null
/// handle from [`CompileError::handle`] and the failure resurfaces at link
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub kind: ShaderKind,
    /// Compiler diagnostics. May be empty when the driver reports none.
    pub log: String,
}

impl CompileError {
    /// Handle value standing in for the failed stage.
    #[inline]
    pub fn handle(&self) -> ShaderHandle {
        ShaderHandle::NULL
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log = self.log.trim_end();
        if log.is_empty() {
            write!(f, "{} shader compilation failed (no log)", self.kind)
        } else {
            write!(f, "{} shader compilation failed: {}", self.kind, log)
        }
    }
}

impl std::error::Error for CompileError {}

/// Compiles [`ShaderSource`]s into driver shader objects.
pub struct ShaderCompiler<'d, D: Driver + ?Sized> {
    driver: &'d D,
}

impl<'d, D: Driver + ?Sized> ShaderCompiler<'d, D> {
    pub fn new(driver: &'d D) -> Self {
        Self { driver }
    }

    /// Creates, compiles and checks one shader object.
    ///
    /// On failure the shader object is deleted before returning, so the only
    /// thing the caller owns afterwards is the diagnostic.
    pub fn compile(&self, source: &ShaderSource) -> Result<ShaderHandle, CompileError> {
        let kind = source.kind();
        if source.text().is_empty() {
            return Err(CompileError {
                kind,
                log: "shader source is empty".to_string(),
            });
        }

        let shader = self
            .driver
            .create_shader(kind)
            .map_err(|log| CompileError { kind, log })?;

        self.driver.shader_source(shader, source.text());
        self.driver.compile_shader(shader);

        if self.driver.shader_compile_status(shader) {
            log::debug!("compiled {kind} shader {shader:?}");
            return Ok(shader);
        }

        let log = self.driver.shader_info_log(shader);
        self.driver.delete_shader(shader);

        let err = CompileError { kind, log };
        log::error!("{err}");
        Err(err)
    }

    /// Like [`compile`](Self::compile) but degrades a failure to the null
    /// handle, returning the diagnostic alongside.
    pub fn compile_or_null(&self, source: &ShaderSource) -> (ShaderHandle, Option<CompileError>) {
        match self.compile(source) {
            Ok(shader) => (shader, None),
            Err(err) => (err.handle(), Some(err)),
        }
    }
}
